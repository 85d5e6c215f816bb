//! Rendering configuration.

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(2) => "  ",
            Self::Spaces(4) => "    ",
            Self::Spaces(8) => "        ",
            // Fallback to two spaces
            Self::Spaces(_) => "  ",
            Self::Tab => "\t",
        }
    }

    /// Character width of one indent level, for column accounting.
    pub fn width(&self) -> usize {
        self.as_str().chars().count()
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::Spaces(2)
    }
}

/// Options threaded through one rendering call.
///
/// Host capabilities are explicit flags resolved once by the caller;
/// the engine never probes its environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Indentation style; two spaces by default.
    pub indent: Indent,
    /// Soft column limit consulted at wrap points.
    pub column_limit: usize,
    /// Whether the output dialect admits the `default` modifier on
    /// bodied interface functions; when off, the modifier is not
    /// emitted.
    pub default_methods: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_column_limit(mut self, column_limit: usize) -> Self {
        self.column_limit = column_limit;
        self
    }

    pub fn with_default_methods(mut self, default_methods: bool) -> Self {
        self.default_methods = default_methods;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            column_limit: 100,
            default_methods: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_as_str() {
        assert_eq!(Indent::Spaces(2).as_str(), "  ");
        assert_eq!(Indent::Spaces(4).as_str(), "    ");
        assert_eq!(Indent::Tab.as_str(), "\t");
    }

    #[test]
    fn test_indent_width() {
        assert_eq!(Indent::Spaces(4).width(), 4);
        assert_eq!(Indent::Tab.width(), 1);
    }

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert_eq!(opts.indent, Indent::Spaces(2));
        assert_eq!(opts.column_limit, 100);
        assert!(opts.default_methods);
    }

    #[test]
    fn test_fluent_overrides() {
        let opts = RenderOptions::new()
            .with_indent(Indent::Tab)
            .with_column_limit(80)
            .with_default_methods(false);
        assert_eq!(opts.indent, Indent::Tab);
        assert_eq!(opts.column_limit, 80);
        assert!(!opts.default_methods);
    }
}
