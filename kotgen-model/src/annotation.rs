//! Annotation uses.

use indexmap::IndexMap;

use crate::code::CodeBlock;
use crate::name::ClassName;

/// The conventional member name that renders inline: `@Suppress("x")`.
pub const DEFAULT_MEMBER: &str = "value";

/// One use of an annotation on a declaration, function, property, or
/// parameter.
///
/// Members keep insertion order; repeated additions to the same member
/// accumulate into a list, which the writer renders wrapped in braces.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSpec {
    class: ClassName,
    members: IndexMap<String, Vec<CodeBlock>>,
}

impl AnnotationSpec {
    /// An annotation use with no members, e.g. `@Override`.
    pub fn new(class: ClassName) -> Self {
        Self {
            class,
            members: IndexMap::new(),
        }
    }

    pub fn builder(class: ClassName) -> AnnotationSpecBuilder {
        AnnotationSpecBuilder {
            class,
            members: IndexMap::new(),
        }
    }

    /// Derive a builder from this frozen value (structural copy).
    pub fn to_builder(&self) -> AnnotationSpecBuilder {
        AnnotationSpecBuilder {
            class: self.class.clone(),
            members: self.members.clone(),
        }
    }

    pub fn class(&self) -> &ClassName {
        &self.class
    }

    pub fn members(&self) -> &IndexMap<String, Vec<CodeBlock>> {
        &self.members
    }
}

/// Builder for [`AnnotationSpec`].
#[derive(Debug, Clone)]
pub struct AnnotationSpecBuilder {
    class: ClassName,
    members: IndexMap<String, Vec<CodeBlock>>,
}

impl AnnotationSpecBuilder {
    /// Add a value to a member; repeated calls for one member accumulate.
    pub fn member(mut self, name: impl Into<String>, value: CodeBlock) -> Self {
        self.members.entry(name.into()).or_default().push(value);
        self
    }

    pub fn build(self) -> AnnotationSpec {
        AnnotationSpec {
            class: self.class,
            members: self.members,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::code::Arg;

    use super::*;

    fn header() -> ClassName {
        ClassName::new("com.example", "Header")
    }

    #[test]
    fn test_marker_annotation() {
        let spec = AnnotationSpec::new(header());
        assert!(spec.members().is_empty());
        assert_eq!(spec.class().simple_name(), "Header");
    }

    #[test]
    fn test_members_keep_insertion_order() {
        let spec = AnnotationSpec::builder(header())
            .member("name", CodeBlock::of("%S", [Arg::from("Accept")]).unwrap())
            .member("required", CodeBlock::of("true", []).unwrap())
            .build();
        let names: Vec<&str> = spec.members().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["name", "required"]);
    }

    #[test]
    fn test_repeated_member_accumulates() {
        let spec = AnnotationSpec::builder(header())
            .member(DEFAULT_MEMBER, CodeBlock::of("%S", [Arg::from("a")]).unwrap())
            .member(DEFAULT_MEMBER, CodeBlock::of("%S", [Arg::from("b")]).unwrap())
            .build();
        assert_eq!(spec.members()[DEFAULT_MEMBER].len(), 2);
    }

    #[test]
    fn test_to_builder_does_not_alias() {
        let original = AnnotationSpec::new(header());
        let derived = original
            .to_builder()
            .member("x", CodeBlock::of("1", []).unwrap())
            .build();
        assert!(original.members().is_empty());
        assert_eq!(derived.members().len(), 1);
    }
}
