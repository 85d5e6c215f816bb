//! Function parameters.

use crate::annotation::AnnotationSpec;
use crate::code::Arg;
use crate::types::TypeRef;

/// A function or constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    name: String,
    type_ref: TypeRef,
    annotations: Vec<AnnotationSpec>,
}

impl ParamSpec {
    /// A plain parameter with no annotations.
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            annotations: Vec::new(),
        }
    }

    pub fn builder(name: impl Into<String>, type_ref: TypeRef) -> ParamSpecBuilder {
        ParamSpecBuilder {
            name: name.into(),
            type_ref,
            annotations: Vec::new(),
        }
    }

    /// Derive a builder from this frozen value (structural copy).
    pub fn to_builder(&self) -> ParamSpecBuilder {
        ParamSpecBuilder {
            name: self.name.clone(),
            type_ref: self.type_ref.clone(),
            annotations: self.annotations.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn annotations(&self) -> &[AnnotationSpec] {
        &self.annotations
    }
}

impl From<&ParamSpec> for Arg {
    fn from(value: &ParamSpec) -> Self {
        Arg::Name(value.name.clone())
    }
}

/// Builder for [`ParamSpec`].
#[derive(Debug, Clone)]
pub struct ParamSpecBuilder {
    name: String,
    type_ref: TypeRef,
    annotations: Vec<AnnotationSpec>,
}

impl ParamSpecBuilder {
    pub fn annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn annotations(mut self, annotations: impl IntoIterator<Item = AnnotationSpec>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    pub fn build(self) -> ParamSpec {
        ParamSpec {
            name: self.name,
            type_ref: self.type_ref,
            annotations: self.annotations,
        }
    }
}
