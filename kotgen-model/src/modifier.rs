//! Declaration modifiers.

/// A declaration modifier keyword.
///
/// Modifier sets are unordered on input; the derived `Ord` fixes the
/// canonical emission order, so storing them in a `BTreeSet` makes the
/// rendered order independent of insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Internal,
    Override,
    Abstract,
    Default,
    Static,
    Final,
    Open,
    Const,
}

impl Modifier {
    /// The keyword as it appears in generated source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Internal => "internal",
            Self::Override => "override",
            Self::Abstract => "abstract",
            Self::Default => "default",
            Self::Static => "static",
            Self::Final => "final",
            Self::Open => "open",
            Self::Const => "const",
        }
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_canonical_order() {
        let mut set = BTreeSet::new();
        set.insert(Modifier::Final);
        set.insert(Modifier::Public);
        set.insert(Modifier::Static);

        let rendered: Vec<&str> = set.iter().map(Modifier::as_str).collect();
        assert_eq!(rendered, vec!["public", "static", "final"]);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(Modifier::Internal.as_str(), "internal");
        assert_eq!(Modifier::Override.to_string(), "override");
    }
}
