use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Result type for model operations (boxed to reduce size on stack).
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("unknown format directive '%{directive}'")]
    #[diagnostic(
        code(kotgen::unknown_directive),
        help("valid directives are %L, %N, %S, %T, %%, %W, %>, %<, %[ and %]")
    )]
    UnknownDirective {
        #[source_code]
        template: String,
        #[label("this directive")]
        span: SourceSpan,
        directive: char,
    },

    #[error("dangling '%' at end of format string")]
    #[diagnostic(code(kotgen::dangling_percent), help("write '%%' for a literal percent sign"))]
    DanglingPercent {
        #[source_code]
        template: String,
        #[label("unterminated directive")]
        span: SourceSpan,
    },

    #[error("index {index} for directive '%{index}{directive}' not in range (received {count} argument(s))")]
    #[diagnostic(code(kotgen::index_out_of_range))]
    IndexOutOfRange {
        #[source_code]
        template: String,
        #[label("index out of range")]
        span: SourceSpan,
        index: usize,
        directive: char,
        count: usize,
    },

    #[error("no argument left to bind to '%{directive}' (received {count} argument(s))")]
    #[diagnostic(code(kotgen::missing_argument))]
    MissingArgument {
        #[source_code]
        template: String,
        #[label("needs an argument")]
        span: SourceSpan,
        directive: char,
        count: usize,
    },

    #[error("argument {index} cannot be used with '%{directive}': expected {expected}, found {found}")]
    #[diagnostic(code(kotgen::wrong_argument_kind))]
    WrongArgumentKind {
        #[source_code]
        template: String,
        #[label("this directive")]
        span: SourceSpan,
        directive: char,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unused argument(s): {indices}")]
    #[diagnostic(
        code(kotgen::unused_arguments),
        help("every argument must be consumed by at least one directive")
    )]
    UnusedArguments {
        #[source_code]
        template: String,
        indices: String,
    },

    #[error("enum '{name}' must declare at least one constant")]
    #[diagnostic(code(kotgen::structure))]
    EnumWithoutConstants { name: String },

    #[error("{kind} '{name}' cannot declare enum constants")]
    #[diagnostic(code(kotgen::structure))]
    ConstantsOnNonEnum { kind: &'static str, name: String },

    #[error("enum '{name}' declares constant '{constant}' more than once")]
    #[diagnostic(code(kotgen::structure))]
    DuplicateEnumConstant { name: String, constant: String },

    #[error("{kind} '{name}' cannot extend a superclass")]
    #[diagnostic(code(kotgen::structure))]
    SuperclassNotAllowed { kind: &'static str, name: String },

    #[error("class '{name}' already extends '{existing}'")]
    #[diagnostic(code(kotgen::structure), help("a class may have at most one superclass"))]
    SuperclassAlreadySet { name: String, existing: String },

    #[error("function '{function}' in {kind} '{name}' declares a default value")]
    #[diagnostic(
        code(kotgen::structure),
        help("default values are only allowed on annotation declaration members")
    )]
    DefaultValueNotAllowed {
        kind: &'static str,
        name: String,
        function: String,
    },

    #[error("{kind} '{name}' cannot contain initializer blocks")]
    #[diagnostic(code(kotgen::structure))]
    InitializerBlockNotAllowed { kind: &'static str, name: String },

    #[error("initializer of property '{name}' was set more than once")]
    #[diagnostic(code(kotgen::structure))]
    InitializerAlreadySet { name: String },

    #[error("default value of function '{name}' was set more than once")]
    #[diagnostic(code(kotgen::structure))]
    DefaultValueAlreadySet { name: String },

    #[error("varargs function '{name}' must end with an array-shaped parameter")]
    #[diagnostic(code(kotgen::structure))]
    InvalidVarargs { name: String },

    #[error("constructor of '{name}' declares a return type")]
    #[diagnostic(code(kotgen::structure))]
    ConstructorWithReturnType { name: String },
}

impl Error {
    /// Create an unknown-directive error for a span within the template.
    pub(crate) fn unknown_directive(template: &str, span: impl Into<SourceSpan>, directive: char) -> Box<Self> {
        Box::new(Error::UnknownDirective {
            template: template.to_string(),
            span: span.into(),
            directive,
        })
    }

    pub(crate) fn dangling_percent(template: &str, span: impl Into<SourceSpan>) -> Box<Self> {
        Box::new(Error::DanglingPercent {
            template: template.to_string(),
            span: span.into(),
        })
    }

    pub(crate) fn index_out_of_range(
        template: &str,
        span: impl Into<SourceSpan>,
        index: usize,
        directive: char,
        count: usize,
    ) -> Box<Self> {
        Box::new(Error::IndexOutOfRange {
            template: template.to_string(),
            span: span.into(),
            index,
            directive,
            count,
        })
    }

    pub(crate) fn missing_argument(
        template: &str,
        span: impl Into<SourceSpan>,
        directive: char,
        count: usize,
    ) -> Box<Self> {
        Box::new(Error::MissingArgument {
            template: template.to_string(),
            span: span.into(),
            directive,
            count,
        })
    }

    pub(crate) fn wrong_argument_kind(
        template: &str,
        span: impl Into<SourceSpan>,
        directive: char,
        index: usize,
        expected: &'static str,
        found: &'static str,
    ) -> Box<Self> {
        Box::new(Error::WrongArgumentKind {
            template: template.to_string(),
            span: span.into(),
            directive,
            index,
            expected,
            found,
        })
    }

    pub(crate) fn unused_arguments(template: &str, unused: &[usize]) -> Box<Self> {
        let indices = unused
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Box::new(Error::UnusedArguments {
            template: template.to_string(),
            indices,
        })
    }
}
