//! Properties (fields) of a declaration.

use std::collections::BTreeSet;

use crate::annotation::AnnotationSpec;
use crate::code::{Arg, CodeBlock};
use crate::error::{Error, Result};
use crate::modifier::Modifier;
use crate::types::TypeRef;

/// A property of a declaration: type, name, modifiers, documentation,
/// annotations, optional initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    name: String,
    type_ref: TypeRef,
    modifiers: BTreeSet<Modifier>,
    doc: Option<String>,
    annotations: Vec<AnnotationSpec>,
    initializer: Option<CodeBlock>,
}

impl PropertySpec {
    pub fn builder(name: impl Into<String>, type_ref: TypeRef) -> PropertySpecBuilder {
        PropertySpecBuilder {
            name: name.into(),
            type_ref,
            modifiers: BTreeSet::new(),
            doc: None,
            annotations: Vec::new(),
            initializer: None,
            initializer_set_twice: false,
        }
    }

    /// Derive a builder from this frozen value (structural copy).
    pub fn to_builder(&self) -> PropertySpecBuilder {
        PropertySpecBuilder {
            name: self.name.clone(),
            type_ref: self.type_ref.clone(),
            modifiers: self.modifiers.clone(),
            doc: self.doc.clone(),
            annotations: self.annotations.clone(),
            initializer: self.initializer.clone(),
            initializer_set_twice: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn modifiers(&self) -> &BTreeSet<Modifier> {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn annotations(&self) -> &[AnnotationSpec] {
        &self.annotations
    }

    pub fn initializer(&self) -> Option<&CodeBlock> {
        self.initializer.as_ref()
    }
}

impl From<&PropertySpec> for Arg {
    fn from(value: &PropertySpec) -> Self {
        Arg::Name(value.name.clone())
    }
}

/// Builder for [`PropertySpec`].
///
/// The initializer is a single-assignment slot; setting it twice is
/// recorded and reported by `build()`.
#[derive(Debug, Clone)]
pub struct PropertySpecBuilder {
    name: String,
    type_ref: TypeRef,
    modifiers: BTreeSet<Modifier>,
    doc: Option<String>,
    annotations: Vec<AnnotationSpec>,
    initializer: Option<CodeBlock>,
    initializer_set_twice: bool,
}

impl PropertySpecBuilder {
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
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

    pub fn initializer(mut self, initializer: CodeBlock) -> Self {
        if self.initializer.is_some() {
            self.initializer_set_twice = true;
        }
        self.initializer = Some(initializer);
        self
    }

    pub fn build(self) -> Result<PropertySpec> {
        if self.initializer_set_twice {
            return Err(Box::new(Error::InitializerAlreadySet { name: self.name }));
        }
        Ok(PropertySpec {
            name: self.name,
            type_ref: self.type_ref,
            modifiers: self.modifiers,
            doc: self.doc,
            annotations: self.annotations,
            initializer: self.initializer,
        })
    }
}
