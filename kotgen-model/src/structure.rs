//! Declarations: classes, interfaces, enums, annotation declarations.
//!
//! One tagged union with a [`ClassKind`] discriminant; kind-specific
//! invariants are applied uniformly in the single `build()` entry point
//! rather than in parallel builder types per kind.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::annotation::AnnotationSpec;
use crate::code::{Arg, CodeBlock};
use crate::error::{Error, Result};
use crate::function::FunctionSpec;
use crate::modifier::Modifier;
use crate::property::PropertySpec;
use crate::types::TypeRef;

/// The kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl ClassKind {
    /// Noun used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "annotation",
        }
    }

    /// Keyword(s) emitted in generated source.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum class",
            Self::Annotation => "annotation class",
        }
    }
}

/// A frozen declaration.
///
/// Properties and functions keep raw insertion order; the writer
/// partitions them (static/instance, constructor/function) when
/// emitting, so callers may add members in any order. Anonymous bodies
/// (enum constants) have an empty name and may carry constructor
/// arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSpec {
    kind: ClassKind,
    name: String,
    doc: Option<String>,
    modifiers: BTreeSet<Modifier>,
    annotations: Vec<AnnotationSpec>,
    type_variables: Vec<TypeRef>,
    superclass: Option<TypeRef>,
    superinterfaces: Vec<TypeRef>,
    enum_constants: IndexMap<String, ClassSpec>,
    properties: Vec<PropertySpec>,
    functions: Vec<FunctionSpec>,
    nested: Vec<ClassSpec>,
    static_blocks: Vec<CodeBlock>,
    initializer_blocks: Vec<CodeBlock>,
    originating_elements: Vec<String>,
    anonymous_args: Option<CodeBlock>,
}

impl ClassSpec {
    pub fn class_builder(name: impl Into<String>) -> ClassSpecBuilder {
        ClassSpecBuilder::new(ClassKind::Class, name.into())
    }

    pub fn interface_builder(name: impl Into<String>) -> ClassSpecBuilder {
        ClassSpecBuilder::new(ClassKind::Interface, name.into())
    }

    pub fn enum_builder(name: impl Into<String>) -> ClassSpecBuilder {
        ClassSpecBuilder::new(ClassKind::Enum, name.into())
    }

    pub fn annotation_builder(name: impl Into<String>) -> ClassSpecBuilder {
        ClassSpecBuilder::new(ClassKind::Annotation, name.into())
    }

    /// Builder for an anonymous body (enum constant bodies).
    pub fn anonymous_builder() -> ClassSpecBuilder {
        ClassSpecBuilder::new(ClassKind::Class, String::new())
    }

    /// Derive a builder from this frozen value (structural copy).
    pub fn to_builder(&self) -> ClassSpecBuilder {
        ClassSpecBuilder {
            kind: self.kind,
            name: self.name.clone(),
            doc: self.doc.clone(),
            modifiers: self.modifiers.clone(),
            annotations: self.annotations.clone(),
            type_variables: self.type_variables.clone(),
            superclass: self.superclass.clone(),
            superinterfaces: self.superinterfaces.clone(),
            enum_constants: self.enum_constants.clone(),
            properties: self.properties.clone(),
            functions: self.functions.clone(),
            nested: self.nested.clone(),
            static_blocks: self.static_blocks.clone(),
            initializer_blocks: self.initializer_blocks.clone(),
            originating_elements: self.originating_elements.clone(),
            anonymous_args: self.anonymous_args.clone(),
            superclass_set_twice: None,
            duplicate_constant: None,
        }
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn modifiers(&self) -> &BTreeSet<Modifier> {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn annotations(&self) -> &[AnnotationSpec] {
        &self.annotations
    }

    pub fn type_variables(&self) -> &[TypeRef] {
        &self.type_variables
    }

    pub fn superclass(&self) -> Option<&TypeRef> {
        self.superclass.as_ref()
    }

    pub fn superinterfaces(&self) -> &[TypeRef] {
        &self.superinterfaces
    }

    pub fn enum_constants(&self) -> &IndexMap<String, ClassSpec> {
        &self.enum_constants
    }

    pub fn properties(&self) -> &[PropertySpec] {
        &self.properties
    }

    pub fn functions(&self) -> &[FunctionSpec] {
        &self.functions
    }

    pub fn nested_types(&self) -> &[ClassSpec] {
        &self.nested
    }

    pub fn static_blocks(&self) -> &[CodeBlock] {
        &self.static_blocks
    }

    pub fn initializer_blocks(&self) -> &[CodeBlock] {
        &self.initializer_blocks
    }

    /// Opaque host-tool bookkeeping; propagated, never interpreted.
    pub fn originating_elements(&self) -> &[String] {
        &self.originating_elements
    }

    /// Constructor arguments of an anonymous body.
    pub fn anonymous_args(&self) -> Option<&CodeBlock> {
        self.anonymous_args.as_ref()
    }

    /// Whether the declaration has any body content besides enum
    /// constants. An enum constant whose body reports `false` here and
    /// has no constructor arguments renders as a bare name.
    pub fn has_members(&self) -> bool {
        !self.properties.is_empty()
            || !self.functions.is_empty()
            || !self.nested.is_empty()
            || !self.static_blocks.is_empty()
            || !self.initializer_blocks.is_empty()
    }
}

impl From<&ClassSpec> for Arg {
    fn from(value: &ClassSpec) -> Self {
        Arg::Name(value.name.clone())
    }
}

/// Builder for [`ClassSpec`].
///
/// Violations that are detectable mid-accumulation (second superclass,
/// duplicate constant) are recorded and reported by `build()`; nothing
/// is ever partially applied.
#[derive(Debug, Clone)]
pub struct ClassSpecBuilder {
    kind: ClassKind,
    name: String,
    doc: Option<String>,
    modifiers: BTreeSet<Modifier>,
    annotations: Vec<AnnotationSpec>,
    type_variables: Vec<TypeRef>,
    superclass: Option<TypeRef>,
    superinterfaces: Vec<TypeRef>,
    enum_constants: IndexMap<String, ClassSpec>,
    properties: Vec<PropertySpec>,
    functions: Vec<FunctionSpec>,
    nested: Vec<ClassSpec>,
    static_blocks: Vec<CodeBlock>,
    initializer_blocks: Vec<CodeBlock>,
    originating_elements: Vec<String>,
    anonymous_args: Option<CodeBlock>,
    superclass_set_twice: Option<String>,
    duplicate_constant: Option<String>,
}

impl ClassSpecBuilder {
    fn new(kind: ClassKind, name: String) -> Self {
        Self {
            kind,
            name,
            doc: None,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            type_variables: Vec::new(),
            superclass: None,
            superinterfaces: Vec::new(),
            enum_constants: IndexMap::new(),
            properties: Vec::new(),
            functions: Vec::new(),
            nested: Vec::new(),
            static_blocks: Vec::new(),
            initializer_blocks: Vec::new(),
            originating_elements: Vec::new(),
            anonymous_args: None,
            superclass_set_twice: None,
            duplicate_constant: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn annotations(mut self, annotations: impl IntoIterator<Item = AnnotationSpec>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    pub fn type_variable(mut self, variable: TypeRef) -> Self {
        self.type_variables.push(variable);
        self
    }

    /// Set the superclass; legal once, and only on `Class` declarations.
    pub fn superclass(mut self, superclass: TypeRef) -> Self {
        if let Some(existing) = &self.superclass {
            self.superclass_set_twice = Some(existing.to_string());
        }
        self.superclass = Some(superclass);
        self
    }

    /// Add a superinterface; duplicates are allowed and preserved.
    pub fn superinterface(mut self, superinterface: TypeRef) -> Self {
        self.superinterfaces.push(superinterface);
        self
    }

    pub fn superinterfaces(mut self, interfaces: impl IntoIterator<Item = TypeRef>) -> Self {
        self.superinterfaces.extend(interfaces);
        self
    }

    /// Add an enum constant with no body.
    pub fn enum_constant(self, name: impl Into<String>) -> Self {
        self.enum_constant_with(name, ClassSpec::anonymous_builder().build_anonymous())
    }

    /// Add an enum constant with an anonymous body.
    pub fn enum_constant_with(mut self, name: impl Into<String>, body: ClassSpec) -> Self {
        let name = name.into();
        if self.enum_constants.contains_key(&name) {
            self.duplicate_constant = Some(name.clone());
        }
        self.enum_constants.insert(name, body);
        self
    }

    pub fn property(mut self, property: PropertySpec) -> Self {
        self.properties.push(property);
        self
    }

    pub fn properties(mut self, properties: impl IntoIterator<Item = PropertySpec>) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn function(mut self, function: FunctionSpec) -> Self {
        self.functions.push(function);
        self
    }

    pub fn functions(mut self, functions: impl IntoIterator<Item = FunctionSpec>) -> Self {
        self.functions.extend(functions);
        self
    }

    pub fn nested_type(mut self, nested: ClassSpec) -> Self {
        self.nested.push(nested);
        self
    }

    /// Add a static initializer block (class/enum only).
    pub fn static_block(mut self, block: CodeBlock) -> Self {
        self.static_blocks.push(block);
        self
    }

    /// Add an instance initializer block (class/enum only).
    pub fn initializer_block(mut self, block: CodeBlock) -> Self {
        self.initializer_blocks.push(block);
        self
    }

    pub fn originating_element(mut self, element: impl Into<String>) -> Self {
        self.originating_elements.push(element.into());
        self
    }

    /// Constructor arguments for an anonymous body (enum constants).
    pub fn constructor_args(mut self, args: CodeBlock) -> Self {
        self.anonymous_args = Some(args);
        self
    }

    pub fn build(self) -> Result<ClassSpec> {
        let kind = self.kind;
        if let Some(existing) = &self.superclass_set_twice {
            return Err(Box::new(Error::SuperclassAlreadySet {
                name: self.name.clone(),
                existing: existing.clone(),
            }));
        }
        if let Some(constant) = &self.duplicate_constant {
            return Err(Box::new(Error::DuplicateEnumConstant {
                name: self.name.clone(),
                constant: constant.clone(),
            }));
        }
        if self.superclass.is_some() && kind != ClassKind::Class {
            return Err(Box::new(Error::SuperclassNotAllowed {
                kind: kind.as_str(),
                name: self.name.clone(),
            }));
        }
        match kind {
            ClassKind::Enum if self.enum_constants.is_empty() => {
                return Err(Box::new(Error::EnumWithoutConstants {
                    name: self.name.clone(),
                }));
            }
            ClassKind::Class | ClassKind::Interface | ClassKind::Annotation
                if !self.enum_constants.is_empty() =>
            {
                return Err(Box::new(Error::ConstantsOnNonEnum {
                    kind: kind.as_str(),
                    name: self.name.clone(),
                }));
            }
            _ => {}
        }
        if (!self.static_blocks.is_empty() || !self.initializer_blocks.is_empty())
            && !matches!(kind, ClassKind::Class | ClassKind::Enum)
        {
            return Err(Box::new(Error::InitializerBlockNotAllowed {
                kind: kind.as_str(),
                name: self.name.clone(),
            }));
        }
        for function in &self.functions {
            if function.default_value().is_some() && kind != ClassKind::Annotation {
                return Err(Box::new(Error::DefaultValueNotAllowed {
                    kind: kind.as_str(),
                    name: self.name.clone(),
                    function: function.name().to_string(),
                }));
            }
        }
        Ok(self.freeze())
    }

    /// Freeze an anonymous body; anonymous bodies have no kind-specific
    /// invariants of their own (their contents were already validated).
    fn build_anonymous(self) -> ClassSpec {
        self.freeze()
    }

    fn freeze(self) -> ClassSpec {
        ClassSpec {
            kind: self.kind,
            name: self.name,
            doc: self.doc,
            modifiers: self.modifiers,
            annotations: self.annotations,
            type_variables: self.type_variables,
            superclass: self.superclass,
            superinterfaces: self.superinterfaces,
            enum_constants: self.enum_constants,
            properties: self.properties,
            functions: self.functions,
            nested: self.nested,
            static_blocks: self.static_blocks,
            initializer_blocks: self.initializer_blocks,
            originating_elements: self.originating_elements,
            anonymous_args: self.anonymous_args,
        }
    }
}
