//! Type references in generated code.

use std::fmt;

use crate::name::ClassName;

/// A reference to a type, as it appears in signatures, supertypes,
/// bounds, and `%T` template arguments.
///
/// The set is closed: every referenced type is a class, a parameterized
/// class, an array, or a type variable. Class references are resolved to
/// an in-context spelling by the emitter; variables and array/argument
/// structure render as-is around them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A plain class reference.
    Class(ClassName),
    /// A generic class applied to type arguments, e.g. `List<String>`.
    Parameterized {
        raw: ClassName,
        args: Vec<TypeRef>,
    },
    /// An array type, e.g. `String[]`. This is the "array-shaped"
    /// requirement behind the varargs invariant.
    Array(Box<TypeRef>),
    /// A type variable, e.g. `T`; bounds only matter at declaration sites.
    Variable {
        name: String,
        bounds: Vec<TypeRef>,
    },
}

impl TypeRef {
    /// Create a plain class reference.
    pub fn class(name: ClassName) -> Self {
        Self::Class(name)
    }

    /// Create a parameterized class reference.
    pub fn parameterized(raw: ClassName, args: impl IntoIterator<Item = TypeRef>) -> Self {
        Self::Parameterized {
            raw,
            args: args.into_iter().collect(),
        }
    }

    /// Create an array type.
    pub fn array(component: TypeRef) -> Self {
        Self::Array(Box::new(component))
    }

    /// Create an unbounded type variable.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Create a bounded type variable.
    pub fn variable_bounded(
        name: impl Into<String>,
        bounds: impl IntoIterator<Item = TypeRef>,
    ) -> Self {
        Self::Variable {
            name: name.into(),
            bounds: bounds.into_iter().collect(),
        }
    }

    /// Whether this reference is array-shaped.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// The array component type, if array-shaped.
    pub fn component(&self) -> Option<&TypeRef> {
        match self {
            Self::Array(component) => Some(component),
            _ => None,
        }
    }
}

impl From<ClassName> for TypeRef {
    fn from(name: ClassName) -> Self {
        Self::Class(name)
    }
}

/// Canonical spelling, for diagnostics only; in-context spelling is the
/// emitter's job.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => f.write_str(&name.canonical_name()),
            Self::Parameterized { raw, args } => {
                f.write_str(&raw.canonical_name())?;
                f.write_str("<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            Self::Array(component) => write!(f, "{}[]", component),
            Self::Variable { name, .. } => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_ref() {
        let ty = TypeRef::class(ClassName::new("java.lang", "String"));
        assert!(!ty.is_array());
        assert_eq!(ty.to_string(), "java.lang.String");
    }

    #[test]
    fn test_parameterized() {
        let list = ClassName::new("java.util", "List");
        let string = ClassName::new("java.lang", "String");
        let ty = TypeRef::parameterized(list, [TypeRef::class(string)]);
        assert_eq!(ty.to_string(), "java.util.List<java.lang.String>");
    }

    #[test]
    fn test_array() {
        let ty = TypeRef::array(TypeRef::class(ClassName::new("java.lang", "String")));
        assert!(ty.is_array());
        assert_eq!(ty.component().unwrap().to_string(), "java.lang.String");
        assert_eq!(ty.to_string(), "java.lang.String[]");
    }

    #[test]
    fn test_variable() {
        let comparable = ClassName::new("java.lang", "Comparable");
        let t = TypeRef::variable_bounded("T", [TypeRef::class(comparable)]);
        assert_eq!(t.to_string(), "T");
        match &t {
            TypeRef::Variable { bounds, .. } => assert_eq!(bounds.len(), 1),
            _ => panic!("expected a variable"),
        }
    }
}
