//! Column-aware layout writing.
//!
//! [`CodeWriter`] serializes a declaration tree: it drives the token
//! streams produced by the template interpreter, asks the resolver how
//! to spell every referenced class, and applies the member-ordering,
//! blank-line, indentation, and wrapping conventions.

use kotgen_model::code::Token;
use kotgen_model::{
    AnnotationSpec, ClassSpec, CodeBlock, FunctionSpec, Modifier, ParamSpec, PropertySpec, TypeRef,
    DEFAULT_MEMBER,
};

use crate::options::RenderOptions;
use crate::resolver::NameResolver;

/// Serializes one declaration tree to text.
pub struct CodeWriter<'a> {
    resolver: &'a NameResolver,
    options: RenderOptions,
    out: String,
    indent_level: usize,
    column: usize,
    at_line_start: bool,
    /// Enclosing declaration names, outermost first.
    scope: Vec<String>,
    /// Open atomic wrapping units: indent level at open.
    units: Vec<usize>,
}

impl<'a> CodeWriter<'a> {
    pub fn new(resolver: &'a NameResolver, options: RenderOptions) -> Self {
        Self {
            resolver,
            options,
            out: String::new(),
            indent_level: 0,
            column: 0,
            at_line_start: true,
            scope: Vec::new(),
            units: Vec::new(),
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    // =========================================================================
    // Low-level text primitives
    // =========================================================================

    fn ensure_indent(&mut self) {
        if self.at_line_start {
            for _ in 0..self.indent_level {
                self.out.push_str(self.options.indent.as_str());
            }
            self.column = self.indent_level * self.options.indent.width();
            self.at_line_start = false;
        }
    }

    /// Write text, handling embedded newlines and indentation.
    pub(crate) fn write_text(&mut self, text: &str) {
        let mut rest = text;
        while let Some(pos) = rest.find('\n') {
            let line = &rest[..pos];
            if !line.is_empty() {
                self.ensure_indent();
                self.out.push_str(line);
            }
            self.out.push('\n');
            self.at_line_start = true;
            self.column = 0;
            rest = &rest[pos + 1..];
        }
        if !rest.is_empty() {
            self.ensure_indent();
            self.out.push_str(rest);
            self.column += rest.chars().count();
        }
    }

    /// Write one full line at the current indent.
    fn line(&mut self, text: &str) {
        self.ensure_indent();
        self.out.push_str(text);
        self.out.push('\n');
        self.at_line_start = true;
        self.column = 0;
    }

    fn ensure_line_end(&mut self) {
        if !self.at_line_start {
            self.write_text("\n");
        }
    }

    /// A candidate wrap point: a space, unless the content since the
    /// last break already exceeds the column limit. Breaks inside an
    /// atomic unit continue one level deeper than the unit's own indent.
    fn wrap_point(&mut self) {
        if self.column > self.options.column_limit {
            let level = self
                .units
                .last()
                .map(|unit| unit + 1)
                .unwrap_or(self.indent_level);
            self.out.push('\n');
            for _ in 0..level {
                self.out.push_str(self.options.indent.as_str());
            }
            self.column = level * self.options.indent.width();
            self.at_line_start = false;
        } else {
            self.ensure_indent();
            self.out.push(' ');
            self.column += 1;
        }
    }

    // =========================================================================
    // Token stream emission
    // =========================================================================

    /// Emit a code fragment's token stream.
    pub fn emit_block(&mut self, block: &CodeBlock) {
        for token in block.tokens() {
            match token {
                Token::Text(text) => self.write_text(text),
                Token::Str(value) => self.write_string_literal(value.as_deref()),
                Token::Type(type_ref) => {
                    let spelled = self.type_spelling(type_ref);
                    self.write_text(&spelled);
                }
                Token::Wrap => self.wrap_point(),
                Token::Indent => self.indent_level += 1,
                Token::Unindent => self.indent_level = self.indent_level.saturating_sub(1),
                Token::OpenUnit => self.units.push(self.indent_level),
                Token::CloseUnit => {
                    self.units.pop();
                }
            }
        }
    }

    /// Emit a quoted, escape-encoded string literal. A multi-line value
    /// becomes one quoted segment per source line joined by `+`
    /// continuations one level deeper; `None` emits the unquoted `null`.
    fn write_string_literal(&mut self, value: Option<&str>) {
        let Some(value) = value else {
            self.write_text("null");
            return;
        };
        let segments: Vec<&str> = value.split('\n').collect();
        let count = segments.len();
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
                let level = self.indent_level + 1;
                for _ in 0..level {
                    self.out.push_str(self.options.indent.as_str());
                }
                self.out.push_str("+ ");
                self.column = level * self.options.indent.width() + 2;
                self.at_line_start = false;
            }
            self.ensure_indent();
            let mut literal = String::from("\"");
            escape_into(&mut literal, segment);
            if i + 1 < count {
                literal.push_str("\\n");
            }
            literal.push('"');
            self.column += literal.chars().count();
            self.out.push_str(&literal);
        }
    }

    // =========================================================================
    // Spellings
    // =========================================================================

    fn type_spelling(&self, type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Class(name) => self.resolver.resolve(name, &self.scope),
            TypeRef::Parameterized { raw, args } => {
                let mut spelled = self.resolver.resolve(raw, &self.scope);
                spelled.push('<');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        spelled.push_str(", ");
                    }
                    spelled.push_str(&self.type_spelling(arg));
                }
                spelled.push('>');
                spelled
            }
            TypeRef::Array(component) => format!("{}[]", self.type_spelling(component)),
            TypeRef::Variable { name, .. } => name.clone(),
        }
    }

    /// Declaration-site spelling of a type variable, with bounds.
    fn type_variable_decl(&self, type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Variable { name, bounds } if !bounds.is_empty() => {
                let bounds: Vec<String> = bounds.iter().map(|b| self.type_spelling(b)).collect();
                format!("{} : {}", name, bounds.join(" & "))
            }
            other => self.type_spelling(other),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Emit a named declaration, ending with `}` and a newline.
    pub fn emit_class(&mut self, spec: &ClassSpec) {
        if let Some(doc) = spec.doc() {
            self.emit_doc(doc);
        }
        for annotation in spec.annotations() {
            self.emit_annotation(annotation);
            self.write_text("\n");
        }
        self.emit_modifiers(spec.modifiers());
        self.write_text(spec.kind().keyword());
        self.write_text(" ");
        self.write_text(spec.name());
        self.scope.push(spec.name().to_string());
        if !spec.type_variables().is_empty() {
            self.write_text("<");
            for (i, variable) in spec.type_variables().iter().enumerate() {
                if i > 0 {
                    self.write_text(", ");
                }
                let spelled = self.type_variable_decl(variable);
                self.write_text(&spelled);
            }
            self.write_text(">");
        }
        let mut supertypes: Vec<&TypeRef> = Vec::new();
        supertypes.extend(spec.superclass());
        supertypes.extend(spec.superinterfaces());
        if !supertypes.is_empty() {
            self.write_text(" : ");
            for (i, supertype) in supertypes.iter().enumerate() {
                if i > 0 {
                    self.write_text(",");
                    self.wrap_point();
                }
                let spelled = self.type_spelling(supertype);
                self.write_text(&spelled);
            }
        }
        self.write_text(" {\n");
        self.indent_level += 1;
        self.emit_members(spec);
        self.indent_level -= 1;
        self.write_text("}\n");
        self.scope.pop();
    }

    /// Emit members in the fixed group order, one blank line between
    /// non-empty groups: enum constants, static properties, static
    /// blocks, instance properties, instance blocks, constructors,
    /// functions (raw insertion order), nested declarations.
    fn emit_members(&mut self, spec: &ClassSpec) {
        let mut first_group = true;

        if !spec.enum_constants().is_empty() {
            let count = spec.enum_constants().len();
            for (i, (name, body)) in spec.enum_constants().iter().enumerate() {
                if i > 0 {
                    self.write_text("\n");
                }
                self.emit_enum_constant(name, body, i + 1 == count, spec.has_members());
            }
            first_group = false;
        }

        let statics: Vec<&PropertySpec> = spec
            .properties()
            .iter()
            .filter(|p| p.has_modifier(Modifier::Static))
            .collect();
        let instances: Vec<&PropertySpec> = spec
            .properties()
            .iter()
            .filter(|p| !p.has_modifier(Modifier::Static))
            .collect();
        let constructors: Vec<&FunctionSpec> = spec
            .functions()
            .iter()
            .filter(|f| f.is_constructor())
            .collect();
        let functions: Vec<&FunctionSpec> = spec
            .functions()
            .iter()
            .filter(|f| !f.is_constructor())
            .collect();

        if !statics.is_empty() {
            if !first_group {
                self.write_text("\n");
            }
            first_group = false;
            for property in statics {
                self.emit_property(property);
            }
        }

        if !spec.static_blocks().is_empty() {
            if !first_group {
                self.write_text("\n");
            }
            first_group = false;
            for block in spec.static_blocks() {
                self.emit_initializer("static", block);
            }
        }

        if !instances.is_empty() {
            if !first_group {
                self.write_text("\n");
            }
            first_group = false;
            for property in instances {
                self.emit_property(property);
            }
        }

        if !spec.initializer_blocks().is_empty() {
            if !first_group {
                self.write_text("\n");
            }
            first_group = false;
            for block in spec.initializer_blocks() {
                self.emit_initializer("init", block);
            }
        }

        if !constructors.is_empty() {
            if !first_group {
                self.write_text("\n");
            }
            first_group = false;
            for (i, constructor) in constructors.iter().enumerate() {
                if i > 0 {
                    self.write_text("\n");
                }
                self.emit_function(constructor);
            }
        }

        if !functions.is_empty() {
            if !first_group {
                self.write_text("\n");
            }
            first_group = false;
            for (i, function) in functions.iter().enumerate() {
                if i > 0 {
                    self.write_text("\n");
                }
                self.emit_function(function);
            }
        }

        if !spec.nested_types().is_empty() {
            if !first_group {
                self.write_text("\n");
            }
            for (i, nested) in spec.nested_types().iter().enumerate() {
                if i > 0 {
                    self.write_text("\n");
                }
                self.emit_class(nested);
            }
        }
    }

    fn emit_enum_constant(
        &mut self,
        name: &str,
        body: &ClassSpec,
        is_last: bool,
        enum_has_members: bool,
    ) {
        if let Some(doc) = body.doc() {
            self.emit_doc(doc);
        }
        for annotation in body.annotations() {
            self.emit_annotation(annotation);
            self.write_text("\n");
        }
        self.write_text(name);
        if let Some(args) = body.anonymous_args() {
            self.write_text("(");
            self.emit_block(args);
            self.write_text(")");
        }
        if body.has_members() {
            self.write_text(" {\n");
            self.indent_level += 1;
            self.emit_members(body);
            self.indent_level -= 1;
            self.write_text("}");
        }
        if !is_last {
            self.write_text(",\n");
        } else if enum_has_members {
            self.write_text(";\n");
        } else {
            self.write_text("\n");
        }
    }

    fn emit_property(&mut self, spec: &PropertySpec) {
        if let Some(doc) = spec.doc() {
            self.emit_doc(doc);
        }
        for annotation in spec.annotations() {
            self.emit_annotation(annotation);
            self.write_text("\n");
        }
        self.emit_modifiers(spec.modifiers());
        self.write_text("val ");
        self.write_text(spec.name());
        self.write_text(": ");
        let spelled = self.type_spelling(spec.type_ref());
        self.write_text(&spelled);
        if let Some(initializer) = spec.initializer() {
            self.write_text(" = ");
            self.emit_block(initializer);
        }
        self.ensure_line_end();
    }

    fn emit_initializer(&mut self, keyword: &str, block: &CodeBlock) {
        self.write_text(keyword);
        self.write_text(" {\n");
        self.indent_level += 1;
        self.emit_block(block);
        self.ensure_line_end();
        self.indent_level -= 1;
        self.write_text("}\n");
    }

    fn emit_function(&mut self, spec: &FunctionSpec) {
        if let Some(doc) = spec.doc() {
            self.emit_doc(doc);
        }
        for annotation in spec.annotations() {
            self.emit_annotation(annotation);
            self.write_text("\n");
        }
        self.emit_modifiers(spec.modifiers());
        if spec.is_constructor() {
            self.write_text("constructor");
        } else {
            self.write_text("fun ");
            if !spec.type_variables().is_empty() {
                self.write_text("<");
                for (i, variable) in spec.type_variables().iter().enumerate() {
                    if i > 0 {
                        self.write_text(", ");
                    }
                    let spelled = self.type_variable_decl(variable);
                    self.write_text(&spelled);
                }
                self.write_text("> ");
            }
            self.write_text(spec.name());
        }
        self.write_text("(");
        self.units.push(self.indent_level);
        let count = spec.params().len();
        for (i, param) in spec.params().iter().enumerate() {
            if i > 0 {
                self.write_text(",");
                self.wrap_point();
            }
            self.emit_param(param, spec.is_varargs() && i + 1 == count);
        }
        self.units.pop();
        self.write_text(")");
        if let Some(return_type) = spec.return_type() {
            self.write_text(": ");
            let spelled = self.type_spelling(return_type);
            self.write_text(&spelled);
        }
        if !spec.throws().is_empty() {
            self.write_text(" throws ");
            for (i, exception) in spec.throws().iter().enumerate() {
                if i > 0 {
                    self.write_text(", ");
                }
                let spelled = self.type_spelling(exception);
                self.write_text(&spelled);
            }
        }
        if let Some(body) = spec.body() {
            self.write_text(" {\n");
            self.indent_level += 1;
            self.emit_block(body);
            self.ensure_line_end();
            self.indent_level -= 1;
            self.write_text("}\n");
        } else if let Some(default_value) = spec.default_value() {
            self.write_text(" default ");
            self.emit_block(default_value);
            self.ensure_line_end();
        } else {
            self.write_text("\n");
        }
    }

    fn emit_param(&mut self, param: &ParamSpec, vararg: bool) {
        for annotation in param.annotations() {
            self.emit_annotation(annotation);
            self.write_text(" ");
        }
        if vararg {
            self.write_text("vararg ");
        }
        self.write_text(param.name());
        self.write_text(": ");
        // Varargs render the component type; the builder guaranteed an
        // array-shaped last parameter.
        let type_ref = if vararg {
            param
                .type_ref()
                .component()
                .cloned()
                .unwrap_or_else(|| param.type_ref().clone())
        } else {
            param.type_ref().clone()
        };
        let spelled = self.type_spelling(&type_ref);
        self.write_text(&spelled);
    }

    // =========================================================================
    // Annotations and documentation
    // =========================================================================

    /// Emit one annotation use, without a trailing newline: inline for
    /// marker annotations and the single conventional `value` member,
    /// one member per line otherwise.
    fn emit_annotation(&mut self, spec: &AnnotationSpec) {
        let spelled = self.resolver.resolve(spec.class(), &self.scope);
        self.write_text("@");
        self.write_text(&spelled);
        if spec.members().is_empty() {
            return;
        }
        let inline = spec.members().len() == 1
            && spec.members().keys().next().map(String::as_str) == Some(DEFAULT_MEMBER);
        if inline {
            self.write_text("(");
            let values = &spec.members()[DEFAULT_MEMBER];
            self.emit_member_value(values);
            self.write_text(")");
            return;
        }
        self.write_text("(\n");
        self.indent_level += 1;
        let count = spec.members().len();
        for (i, (name, values)) in spec.members().iter().enumerate() {
            self.write_text(name);
            self.write_text(" = ");
            self.emit_member_value(values);
            if i + 1 < count {
                self.write_text(",");
            }
            self.write_text("\n");
        }
        self.indent_level -= 1;
        self.write_text(")");
    }

    /// A repeated member value renders as a braced list.
    fn emit_member_value(&mut self, values: &[CodeBlock]) {
        if let [value] = values {
            self.emit_block(value);
            return;
        }
        self.write_text("{");
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.write_text(", ");
            }
            self.emit_block(value);
        }
        self.write_text("}");
    }

    /// Emit a documentation comment. Type names in doc text are never
    /// resolved or imported; as a readability courtesy, canonical names
    /// of already-imported types are abbreviated to their simple names.
    fn emit_doc(&mut self, doc: &str) {
        let doc = self.abbreviate(doc);
        self.line("/**");
        for line in doc.lines() {
            if line.is_empty() {
                self.line(" *");
            } else {
                self.line(&format!(" * {}", line));
            }
        }
        self.line(" */");
    }

    fn abbreviate(&self, doc: &str) -> String {
        let mut imports = self.resolver.imports();
        // Longest first, so nested canonical names shorten correctly.
        imports.sort_by_key(|name| std::cmp::Reverse(name.canonical_name().len()));
        let mut doc = doc.to_string();
        for import in imports {
            doc = doc.replace(&import.canonical_name(), import.simple_name());
        }
        doc
    }

    fn emit_modifiers(&mut self, modifiers: &std::collections::BTreeSet<Modifier>) {
        for modifier in modifiers {
            if *modifier == Modifier::Default && !self.options.default_methods {
                continue;
            }
            self.write_text(modifier.as_str());
            self.write_text(" ");
        }
    }
}

/// Escape one line of a string literal (no newlines).
fn escape_into(out: &mut String, segment: &str) {
    for c in segment.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
}
