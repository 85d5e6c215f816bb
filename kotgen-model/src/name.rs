//! Canonical qualified names for referenced classes.

use std::fmt;

/// A canonical qualified name: package, enclosing simple names, own
/// simple name.
///
/// This is the only identity the engine requires of a referenced symbol;
/// host adapters (reflection handles, compiler elements) reduce to it.
/// Equality and ordering are over the full `(package, path)` pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassName {
    package: String,
    /// Enclosing simple names followed by the own simple name; never empty.
    names: Vec<String>,
}

impl ClassName {
    /// Create a top-level class name. An empty package denotes the
    /// default package.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            names: vec![name.into()],
        }
    }

    /// Create a name nested inside this one.
    pub fn nested(&self, name: impl Into<String>) -> Self {
        let mut names = self.names.clone();
        names.push(name.into());
        Self {
            package: self.package.clone(),
            names,
        }
    }

    /// Create a top-level name in the same package as this one.
    pub fn peer(&self, name: impl Into<String>) -> Self {
        Self::new(self.package.clone(), name)
    }

    /// The package name; empty for the default package.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The own simple name (last element of the path).
    pub fn simple_name(&self) -> &str {
        self.names.last().expect("class name path is never empty")
    }

    /// The full simple-name path, outermost first.
    pub fn simple_names(&self) -> &[String] {
        &self.names
    }

    /// The directly enclosing class name, if this name is nested.
    pub fn enclosing(&self) -> Option<ClassName> {
        if self.names.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            names: self.names[..self.names.len() - 1].to_vec(),
        })
    }

    /// The outermost class this name is nested under (itself if top-level).
    pub fn top_level(&self) -> ClassName {
        Self {
            package: self.package.clone(),
            names: vec![self.names[0].clone()],
        }
    }

    /// Whether this is a top-level name.
    pub fn is_top_level(&self) -> bool {
        self.names.len() == 1
    }

    /// The fully qualified spelling, e.g. `com.example.Outer.Inner`.
    pub fn canonical_name(&self) -> String {
        let path = self.names.join(".");
        if self.package.is_empty() {
            path
        } else {
            format!("{}.{}", self.package, path)
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}
