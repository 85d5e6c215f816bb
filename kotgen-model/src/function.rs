//! Functions and constructors.

use std::collections::BTreeSet;

use crate::annotation::AnnotationSpec;
use crate::code::{Arg, CodeBlock};
use crate::error::{Error, Result};
use crate::modifier::Modifier;
use crate::param::ParamSpec;
use crate::types::TypeRef;

/// A function or constructor of a declaration.
///
/// Constructors carry the [`FunctionSpec::CONSTRUCTOR`] sentinel name and
/// no return type. A function without a body is declaration-only
/// (abstract or interface member); a default value is only legal inside
/// an annotation declaration and is checked when the enclosing
/// declaration is built.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSpec {
    name: String,
    doc: Option<String>,
    modifiers: BTreeSet<Modifier>,
    annotations: Vec<AnnotationSpec>,
    type_variables: Vec<TypeRef>,
    return_type: Option<TypeRef>,
    params: Vec<ParamSpec>,
    varargs: bool,
    throws: Vec<TypeRef>,
    body: Option<CodeBlock>,
    default_value: Option<CodeBlock>,
}

impl FunctionSpec {
    /// Sentinel name identifying constructors.
    pub const CONSTRUCTOR: &'static str = "<init>";

    pub fn builder(name: impl Into<String>) -> FunctionSpecBuilder {
        FunctionSpecBuilder {
            name: name.into(),
            doc: None,
            modifiers: BTreeSet::new(),
            annotations: Vec::new(),
            type_variables: Vec::new(),
            return_type: None,
            params: Vec::new(),
            varargs: false,
            throws: Vec::new(),
            body: None,
            default_value: None,
            default_value_set_twice: false,
        }
    }

    /// Builder for a constructor.
    pub fn constructor() -> FunctionSpecBuilder {
        Self::builder(Self::CONSTRUCTOR)
    }

    /// Derive a builder from this frozen value (structural copy).
    pub fn to_builder(&self) -> FunctionSpecBuilder {
        FunctionSpecBuilder {
            name: self.name.clone(),
            doc: self.doc.clone(),
            modifiers: self.modifiers.clone(),
            annotations: self.annotations.clone(),
            type_variables: self.type_variables.clone(),
            return_type: self.return_type.clone(),
            params: self.params.clone(),
            varargs: self.varargs,
            throws: self.throws.clone(),
            body: self.body.clone(),
            default_value: self.default_value.clone(),
            default_value_set_twice: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_constructor(&self) -> bool {
        self.name == Self::CONSTRUCTOR
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

    pub fn return_type(&self) -> Option<&TypeRef> {
        self.return_type.as_ref()
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn is_varargs(&self) -> bool {
        self.varargs
    }

    pub fn throws(&self) -> &[TypeRef] {
        &self.throws
    }

    pub fn body(&self) -> Option<&CodeBlock> {
        self.body.as_ref()
    }

    pub fn default_value(&self) -> Option<&CodeBlock> {
        self.default_value.as_ref()
    }
}

impl From<&FunctionSpec> for Arg {
    fn from(value: &FunctionSpec) -> Self {
        Arg::Name(value.name.clone())
    }
}

/// Builder for [`FunctionSpec`].
#[derive(Debug, Clone)]
pub struct FunctionSpecBuilder {
    name: String,
    doc: Option<String>,
    modifiers: BTreeSet<Modifier>,
    annotations: Vec<AnnotationSpec>,
    type_variables: Vec<TypeRef>,
    return_type: Option<TypeRef>,
    params: Vec<ParamSpec>,
    varargs: bool,
    throws: Vec<TypeRef>,
    body: Option<CodeBlock>,
    default_value: Option<CodeBlock>,
    default_value_set_twice: bool,
}

impl FunctionSpecBuilder {
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

    /// Add a type variable; only the `Variable` form is meaningful here.
    pub fn type_variable(mut self, variable: TypeRef) -> Self {
        self.type_variables.push(variable);
        self
    }

    pub fn returns(mut self, type_ref: TypeRef) -> Self {
        self.return_type = Some(type_ref);
        self
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = ParamSpec>) -> Self {
        self.params.extend(params);
        self
    }

    /// Mark the last parameter as variadic; it must be array-shaped.
    pub fn varargs(mut self) -> Self {
        self.varargs = true;
        self
    }

    pub fn throws(mut self, exception: TypeRef) -> Self {
        self.throws.push(exception);
        self
    }

    pub fn body(mut self, body: CodeBlock) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the default value (annotation declaration members only; the
    /// enclosing declaration's `build()` enforces that context).
    pub fn default_value(mut self, value: CodeBlock) -> Self {
        if self.default_value.is_some() {
            self.default_value_set_twice = true;
        }
        self.default_value = Some(value);
        self
    }

    pub fn build(self) -> Result<FunctionSpec> {
        if self.default_value_set_twice {
            return Err(Box::new(Error::DefaultValueAlreadySet { name: self.name }));
        }
        if self.name == FunctionSpec::CONSTRUCTOR && self.return_type.is_some() {
            return Err(Box::new(Error::ConstructorWithReturnType { name: self.name }));
        }
        if self.varargs && !self.params.last().is_some_and(|p| p.type_ref().is_array()) {
            return Err(Box::new(Error::InvalidVarargs { name: self.name }));
        }
        Ok(FunctionSpec {
            name: self.name,
            doc: self.doc,
            modifiers: self.modifiers,
            annotations: self.annotations,
            type_variables: self.type_variables,
            return_type: self.return_type,
            params: self.params,
            varargs: self.varargs,
            throws: self.throws,
            body: self.body,
            default_value: self.default_value,
        })
    }
}
