//! Document model for the kotgen source generator.
//!
//! Callers describe a compilation unit through fluent builders; every
//! spec node is validated when built and immutable afterwards. Frozen
//! nodes are freely shareable across renderings; structural edits derive
//! a fresh builder via `to_builder()` instead of mutating.
//!
//! # Module Organization
//!
//! - [`structure`] - Declarations (`ClassSpec`, `ClassKind`)
//! - [`function`] - Functions and constructors (`FunctionSpec`)
//! - [`property`] - Properties (`PropertySpec`)
//! - [`param`] - Parameters (`ParamSpec`)
//! - [`annotation`] - Annotation uses (`AnnotationSpec`)
//! - [`code`] - Code fragments and format templates (`CodeBlock`)
//! - [`name`] / [`types`] - Qualified names and type references
//! - [`error`] - The diagnostic surface

pub mod annotation;
pub mod code;
pub mod error;
pub mod function;
pub mod modifier;
pub mod name;
pub mod param;
pub mod property;
pub mod structure;
pub mod types;

pub use annotation::{AnnotationSpec, AnnotationSpecBuilder, DEFAULT_MEMBER};
pub use code::{Arg, CodeBlock, CodeBlockBuilder, Token};
pub use error::{Error, Result};
pub use function::{FunctionSpec, FunctionSpecBuilder};
pub use modifier::Modifier;
pub use name::ClassName;
pub use param::{ParamSpec, ParamSpecBuilder};
pub use property::{PropertySpec, PropertySpecBuilder};
pub use structure::{ClassKind, ClassSpec, ClassSpecBuilder};
pub use types::TypeRef;
