//! Rendering for the kotgen source generator.
//!
//! This crate turns a `kotgen-model` declaration tree into one formatted
//! compilation unit. The pieces, leaves first:
//!
//! - [`resolver`] - scope-aware qualified-name resolution (import,
//!   abbreviate, or fully qualify every referenced class)
//! - [`writer`] - the layout writer: member ordering, blank lines,
//!   indentation, column-aware wrapping
//! - [`file`] - [`FileSpec`], the compilation-unit entry point
//! - [`options`] - indentation, column limit, capability flags
//!
//! Rendering is synchronous and pure: no I/O, no shared state across
//! calls, byte-identical output for identical input.

pub mod file;
pub mod options;
pub mod resolver;
pub mod writer;

pub use file::{FileSpec, FileSpecBuilder};
pub use options::{Indent, RenderOptions};
pub use resolver::NameResolver;
pub use writer::CodeWriter;
