//! Full compilation-unit rendering scenarios.
//!
//! These tests assert complete expected output strings, so they lock
//! package/import layout, member ordering, blank-line conventions,
//! indentation, and name resolution together.

use kotgen_emit::{FileSpec, RenderOptions};
use kotgen_model::{
    AnnotationSpec, Arg, ClassName, ClassSpec, CodeBlock, FunctionSpec, Modifier, ParamSpec,
    PropertySpec, TypeRef,
};

fn string_class() -> ClassName {
    ClassName::new("java.lang", "String")
}

fn string_type() -> TypeRef {
    TypeRef::class(string_class())
}

fn override_annotation() -> AnnotationSpec {
    AnnotationSpec::new(ClassName::new("java.lang", "Override"))
}

fn statement(template: &str, args: impl IntoIterator<Item = Arg>) -> CodeBlock {
    CodeBlock::builder()
        .add_statement(template, args)
        .unwrap()
        .build()
}

#[test]
fn test_taco_to_string() {
    let taco = ClassSpec::class_builder("Taco")
        .modifiers([Modifier::Public, Modifier::Final])
        .function(
            FunctionSpec::builder("toString")
                .annotation(override_annotation())
                .modifiers([Modifier::Public, Modifier::Final])
                .returns(string_type())
                .body(statement("return %S", [Arg::from("taco")]))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let file = FileSpec::new("com.squareup.tacos", taco);
    assert_eq!(
        file.render(),
        "package com.squareup.tacos\n\
         \n\
         import java.lang.Override\n\
         import java.lang.String\n\
         \n\
         public final class Taco {\n\
         \x20 @Override\n\
         \x20 public final fun toString(): String {\n\
         \x20   return \"taco\";\n\
         \x20 }\n\
         }\n"
    );
}

#[test]
fn test_two_tacos_self_wins_the_name() {
    let own = ClassName::new("com.squareup.tacos", "Taco");
    let other = ClassName::new("com.other", "Taco");
    let comparable = ClassName::new("java.lang", "Comparable");

    let taco = ClassSpec::class_builder("Taco")
        .superclass(TypeRef::class(other))
        .superinterface(TypeRef::parameterized(comparable, [TypeRef::class(own)]))
        .build()
        .unwrap();

    let file = FileSpec::new("com.squareup.tacos", taco);
    assert_eq!(
        file.render(),
        "package com.squareup.tacos\n\
         \n\
         import java.lang.Comparable\n\
         \n\
         class Taco : com.other.Taco, Comparable<Taco> {\n\
         }\n"
    );
}

#[test]
fn test_member_ordering_is_independent_of_insertion_order() {
    let jumble = ClassSpec::class_builder("Jumble")
        .function(
            FunctionSpec::builder("b")
                .body(statement("b()", []))
                .build()
                .unwrap(),
        )
        .property(
            PropertySpec::builder("first", string_type())
                .modifier(Modifier::Static)
                .build()
                .unwrap(),
        )
        .function(
            FunctionSpec::constructor()
                .body(statement("wire()", []))
                .build()
                .unwrap(),
        )
        .property(PropertySpec::builder("second", string_type()).build().unwrap())
        .nested_type(ClassSpec::class_builder("Nested").build().unwrap())
        .function(
            FunctionSpec::builder("a")
                .modifier(Modifier::Static)
                .body(statement("a()", []))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", jumble);
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         import java.lang.String\n\
         \n\
         class Jumble {\n\
         \x20 static val first: String\n\
         \n\
         \x20 val second: String\n\
         \n\
         \x20 constructor() {\n\
         \x20   wire();\n\
         \x20 }\n\
         \n\
         \x20 fun b() {\n\
         \x20   b();\n\
         \x20 }\n\
         \n\
         \x20 static fun a() {\n\
         \x20   a();\n\
         \x20 }\n\
         \n\
         \x20 class Nested {\n\
         \x20 }\n\
         }\n"
    );
}

#[test]
fn test_enum_constants_with_anonymous_bodies() {
    let salsa_body = ClassSpec::anonymous_builder()
        .constructor_args(CodeBlock::of("%S", [Arg::from("hot")]).unwrap())
        .function(
            FunctionSpec::builder("toString")
                .annotation(override_annotation())
                .returns(string_type())
                .body(statement("return %S", [Arg::from("salsa")]))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let topping = ClassSpec::enum_builder("Topping")
        .enum_constant("CHEESE")
        .enum_constant_with("SALSA", salsa_body)
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", topping);
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         import java.lang.Override\n\
         import java.lang.String\n\
         \n\
         enum class Topping {\n\
         \x20 CHEESE,\n\
         \n\
         \x20 SALSA(\"hot\") {\n\
         \x20   @Override\n\
         \x20   fun toString(): String {\n\
         \x20     return \"salsa\";\n\
         \x20   }\n\
         \x20 }\n\
         }\n"
    );
}

#[test]
fn test_enum_constant_list_terminates_with_semicolon_before_members() {
    let topping = ClassSpec::enum_builder("Topping")
        .enum_constant("CHEESE")
        .function(
            FunctionSpec::builder("describe")
                .returns(string_type())
                .body(statement("return %S", [Arg::from("tasty")]))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", topping);
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         import java.lang.String\n\
         \n\
         enum class Topping {\n\
         \x20 CHEESE;\n\
         \n\
         \x20 fun describe(): String {\n\
         \x20   return \"tasty\";\n\
         \x20 }\n\
         }\n"
    );
}

#[test]
fn test_multiline_string_literal() {
    let poem = ClassSpec::class_builder("Poem")
        .property(
            PropertySpec::builder("poem", string_type())
                .initializer(CodeBlock::of("%S", [Arg::from("line one\nline two")]).unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", poem);
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         import java.lang.String\n\
         \n\
         class Poem {\n\
         \x20 val poem: String = \"line one\\n\"\n\
         \x20   + \"line two\"\n\
         }\n"
    );
}

#[test]
fn test_annotation_rendering_forms() {
    let header = ClassName::new("com.example.api", "Header");
    let endpoint = ClassSpec::class_builder("Endpoint")
        .annotation(
            AnnotationSpec::builder(header)
                .member("name", CodeBlock::of("%S", [Arg::from("Accept")]).unwrap())
                .member(
                    "value",
                    CodeBlock::of("%S", [Arg::from("application/json")]).unwrap(),
                )
                .member(
                    "value",
                    CodeBlock::of("%S", [Arg::from("application/xml")]).unwrap(),
                )
                .build(),
        )
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", endpoint);
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         import com.example.api.Header\n\
         \n\
         @Header(\n\
         \x20 name = \"Accept\",\n\
         \x20 value = {\"application/json\", \"application/xml\"}\n\
         )\n\
         class Endpoint {\n\
         }\n"
    );
}

#[test]
fn test_single_value_annotation_renders_inline() {
    let suppress = ClassName::new("java.lang", "SuppressWarnings");
    let spec = ClassSpec::class_builder("Legacy")
        .annotation(
            AnnotationSpec::builder(suppress)
                .member("value", CodeBlock::of("%S", [Arg::from("unchecked")]).unwrap())
                .build(),
        )
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", spec);
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         import java.lang.SuppressWarnings\n\
         \n\
         @SuppressWarnings(\"unchecked\")\n\
         class Legacy {\n\
         }\n"
    );
}

#[test]
fn test_default_methods_capability_flag() {
    let greeter = ClassSpec::interface_builder("Greeter")
        .function(
            FunctionSpec::builder("greet")
                .modifier(Modifier::Default)
                .returns(string_type())
                .body(statement("return %S", [Arg::from("hi")]))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let with_defaults = FileSpec::new("com.example", greeter.clone());
    assert!(with_defaults.render().contains("default fun greet(): String {"));

    let without_defaults = FileSpec::builder("com.example", greeter)
        .options(RenderOptions::new().with_default_methods(false))
        .build();
    assert!(without_defaults.render().contains("\n  fun greet(): String {"));
    assert!(!without_defaults.render().contains("default fun"));
}

#[test]
fn test_scope_relative_spelling() {
    let inner_name = ClassName::new("com.example", "Outer")
        .nested("Middle")
        .nested("Inner");
    let inner = ClassSpec::class_builder("Inner").build().unwrap();
    let middle = ClassSpec::class_builder("Middle")
        .nested_type(inner)
        .build()
        .unwrap();
    let outer = ClassSpec::class_builder("Outer")
        .property(
            PropertySpec::builder("x", TypeRef::class(inner_name))
                .build()
                .unwrap(),
        )
        .nested_type(middle)
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", outer);
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         class Outer {\n\
         \x20 val x: Middle.Inner\n\
         \n\
         \x20 class Middle {\n\
         \x20   class Inner {\n\
         \x20   }\n\
         \x20 }\n\
         }\n"
    );
}

#[test]
fn test_losing_claim_is_qualified_at_every_site() {
    let first = ClassName::new("com.first", "Clash");
    let second = ClassName::new("com.second", "Clash");
    let host = ClassSpec::class_builder("Host")
        .property(
            PropertySpec::builder("a", TypeRef::class(first))
                .build()
                .unwrap(),
        )
        .property(
            PropertySpec::builder("b", TypeRef::class(second.clone()))
                .build()
                .unwrap(),
        )
        .function(
            FunctionSpec::builder("other")
                .returns(TypeRef::class(second))
                .body(statement("return b", []))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", host);
    let rendered = file.render();
    assert!(rendered.contains("import com.first.Clash\n"));
    assert!(!rendered.contains("import com.second.Clash"));
    assert!(rendered.contains("val a: Clash\n"));
    assert!(rendered.contains("val b: com.second.Clash\n"));
    assert!(rendered.contains("fun other(): com.second.Clash {"));
}

#[test]
fn test_varargs_render_the_component_type() {
    let logger = ClassSpec::class_builder("Logger")
        .function(
            FunctionSpec::builder("log")
                .param(ParamSpec::new("messages", TypeRef::array(string_type())))
                .varargs()
                .body(statement("record(messages)", []))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", logger);
    assert!(file.render().contains("fun log(vararg messages: String) {"));
}

#[test]
fn test_long_signature_wraps_with_continuation_indent() {
    let combiner = ClassSpec::class_builder("Combiner")
        .function(
            FunctionSpec::builder("combine")
                .params([
                    ParamSpec::new("alpha", string_type()),
                    ParamSpec::new("beta", string_type()),
                    ParamSpec::new("gamma", string_type()),
                    ParamSpec::new("delta", string_type()),
                ])
                .returns(string_type())
                .body(statement("return alpha", []))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let file = FileSpec::builder("com.example", combiner)
        .column_limit(40)
        .build();
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         import java.lang.String\n\
         \n\
         class Combiner {\n\
         \x20 fun combine(alpha: String, beta: String,\n\
         \x20   gamma: String, delta: String): String {\n\
         \x20   return alpha;\n\
         \x20 }\n\
         }\n"
    );
}

#[test]
fn test_initializer_blocks_follow_their_property_groups() {
    let registry = ClassSpec::class_builder("Registry")
        .property(
            PropertySpec::builder("cache", string_type())
                .modifier(Modifier::Static)
                .build()
                .unwrap(),
        )
        .static_block(statement("prime()", []))
        .property(PropertySpec::builder("name", string_type()).build().unwrap())
        .initializer_block(statement("register()", []))
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", registry);
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         import java.lang.String\n\
         \n\
         class Registry {\n\
         \x20 static val cache: String\n\
         \n\
         \x20 static {\n\
         \x20   prime();\n\
         \x20 }\n\
         \n\
         \x20 val name: String\n\
         \n\
         \x20 init {\n\
         \x20   register();\n\
         \x20 }\n\
         }\n"
    );
}

#[test]
fn test_doc_comments_abbreviate_imported_names() {
    let taco = ClassSpec::class_builder("Taco")
        .doc("A delicious taco.\nMade with java.lang.String cheese.")
        .property(PropertySpec::builder("cheese", string_type()).build().unwrap())
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", taco);
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         import java.lang.String\n\
         \n\
         /**\n\
         \x20* A delicious taco.\n\
         \x20* Made with String cheese.\n\
         \x20*/\n\
         class Taco {\n\
         \x20 val cheese: String\n\
         }\n"
    );
}

#[test]
fn test_annotation_declaration_members_take_defaults() {
    let config = ClassSpec::annotation_builder("Config")
        .function(
            FunctionSpec::builder("timeout")
                .returns(string_type())
                .default_value(CodeBlock::of("%S", [Arg::from("none")]).unwrap())
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", config);
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         import java.lang.String\n\
         \n\
         annotation class Config {\n\
         \x20 fun timeout(): String default \"none\"\n\
         }\n"
    );
}

#[test]
fn test_thrown_exceptions() {
    let io_exception = ClassName::new("java.io", "IOException");
    let reader = ClassSpec::class_builder("Reader")
        .function(
            FunctionSpec::builder("read")
                .returns(string_type())
                .throws(TypeRef::class(io_exception))
                .body(statement("return pull()", []))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", reader);
    assert!(
        file.render()
            .contains("fun read(): String throws IOException {")
    );
    assert!(file.render().contains("import java.io.IOException\n"));
}

#[test]
fn test_type_variables_with_bounds() {
    let comparable = ClassName::new("java.lang", "Comparable");
    let boxed = ClassSpec::class_builder("Box")
        .type_variable(TypeRef::variable_bounded(
            "T",
            [TypeRef::class(comparable)],
        ))
        .property(
            PropertySpec::builder("value", TypeRef::variable("T"))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let file = FileSpec::new("com.example", boxed);
    assert_eq!(
        file.render(),
        "package com.example\n\
         \n\
         import java.lang.Comparable\n\
         \n\
         class Box<T : Comparable> {\n\
         \x20 val value: T\n\
         }\n"
    );
}

#[test]
fn test_frozen_specs_are_reusable_across_files() {
    let shared = ClassSpec::class_builder("Shared").build().unwrap();
    let one = FileSpec::new("com.one", shared.clone()).render();
    let two = FileSpec::new("com.two", shared).render();
    assert!(one.starts_with("package com.one\n"));
    assert!(two.starts_with("package com.two\n"));
}
