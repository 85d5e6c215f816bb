//! Compilation-unit rendering.
//!
//! A [`FileSpec`] pairs a package name with one top-level declaration
//! and renders the complete unit: package line, resolved import list,
//! declaration, trailing newline. Writing the text anywhere is the
//! caller's business; the engine produces a single string.

use std::fmt;

use kotgen_model::ClassSpec;

use crate::options::{Indent, RenderOptions};
use crate::resolver::NameResolver;
use crate::writer::CodeWriter;

/// A frozen compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSpec {
    package: String,
    class: ClassSpec,
    options: RenderOptions,
}

impl FileSpec {
    /// A file with default rendering options.
    pub fn new(package: impl Into<String>, class: ClassSpec) -> Self {
        Self {
            package: package.into(),
            class,
            options: RenderOptions::default(),
        }
    }

    pub fn builder(package: impl Into<String>, class: ClassSpec) -> FileSpecBuilder {
        FileSpecBuilder {
            package: package.into(),
            class,
            options: RenderOptions::default(),
        }
    }

    /// Derive a builder from this frozen value (structural copy).
    pub fn to_builder(&self) -> FileSpecBuilder {
        FileSpecBuilder {
            package: self.package.clone(),
            class: self.class.clone(),
            options: self.options,
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn class(&self) -> &ClassSpec {
        &self.class
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Originating elements aggregated from the whole declaration tree,
    /// for host-tool bookkeeping; never interpreted here.
    pub fn originating_elements(&self) -> Vec<&str> {
        let mut elements = Vec::new();
        collect_originating(&self.class, &mut elements);
        elements
    }

    /// Render the compilation unit. Resolution state is built here and
    /// discarded with the call; rendering the same file twice yields
    /// byte-identical text.
    pub fn render(&self) -> String {
        let resolver = NameResolver::new(self.package.clone(), &self.class);
        let mut writer = CodeWriter::new(&resolver, self.options);

        if !self.package.is_empty() {
            writer.write_text("package ");
            writer.write_text(&self.package);
            writer.write_text("\n\n");
        }

        let imports = resolver.imports();
        if !imports.is_empty() {
            for import in &imports {
                writer.write_text("import ");
                writer.write_text(&import.canonical_name());
                writer.write_text("\n");
            }
            writer.write_text("\n");
        }

        writer.emit_class(&self.class);
        writer.finish()
    }
}

impl fmt::Display for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn collect_originating<'a>(class: &'a ClassSpec, out: &mut Vec<&'a str>) {
    for element in class.originating_elements() {
        out.push(element);
    }
    for body in class.enum_constants().values() {
        collect_originating(body, out);
    }
    for nested in class.nested_types() {
        collect_originating(nested, out);
    }
}

/// Builder for [`FileSpec`].
#[derive(Debug, Clone)]
pub struct FileSpecBuilder {
    package: String,
    class: ClassSpec,
    options: RenderOptions,
}

impl FileSpecBuilder {
    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.options.indent = indent;
        self
    }

    pub fn column_limit(mut self, column_limit: usize) -> Self {
        self.options.column_limit = column_limit;
        self
    }

    pub fn default_methods(mut self, default_methods: bool) -> Self {
        self.options.default_methods = default_methods;
        self
    }

    pub fn build(self) -> FileSpec {
        FileSpec {
            package: self.package,
            class: self.class,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_class_file() {
        let class = ClassSpec::class_builder("Empty").build().unwrap();
        let file = FileSpec::new("com.example", class);
        assert_eq!(file.render(), "package com.example\n\nclass Empty {\n}\n");
    }

    #[test]
    fn test_default_package_omits_package_line() {
        let class = ClassSpec::class_builder("Empty").build().unwrap();
        let file = FileSpec::new("", class);
        assert_eq!(file.render(), "class Empty {\n}\n");
    }

    #[test]
    fn test_display_matches_render() {
        let class = ClassSpec::class_builder("Empty").build().unwrap();
        let file = FileSpec::new("com.example", class);
        assert_eq!(file.to_string(), file.render());
    }

    #[test]
    fn test_rendering_twice_is_identical() {
        let class = ClassSpec::class_builder("Empty").build().unwrap();
        let file = FileSpec::new("com.example", class);
        assert_eq!(file.render(), file.render());
    }

    #[test]
    fn test_originating_elements_aggregate() {
        let nested = ClassSpec::class_builder("Inner")
            .originating_element("Inner.kt")
            .build()
            .unwrap();
        let class = ClassSpec::class_builder("Outer")
            .originating_element("Outer.kt")
            .nested_type(nested)
            .build()
            .unwrap();
        let file = FileSpec::new("com.example", class);
        assert_eq!(file.originating_elements(), vec!["Outer.kt", "Inner.kt"]);
    }

    #[test]
    fn test_builder_options() {
        let class = ClassSpec::class_builder("Empty").build().unwrap();
        let file = FileSpec::builder("com.example", class)
            .indent(Indent::Spaces(4))
            .column_limit(80)
            .build();
        assert_eq!(file.options().column_limit, 80);
        assert_eq!(file.options().indent, Indent::Spaces(4));
    }
}
