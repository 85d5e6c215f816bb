//! Scope-aware qualified-name resolution.
//!
//! Before writing, the resolver walks the whole declaration tree once
//! and decides, for every referenced class, whether it may be spelled by
//! its bare simple name (one import per simple name, first-referenced
//! wins), must be spelled fully qualified, or, for the file's own
//! declarations, is spelled relative to the current lexical scope.
//! Resolution never fails: the fallback is always the fully qualified
//! spelling.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use kotgen_model::code::Token;
use kotgen_model::{AnnotationSpec, ClassName, ClassSpec, CodeBlock, FunctionSpec, TypeRef};

/// Per-file name resolution state; built once per rendering call and
/// discarded with it.
#[derive(Debug)]
pub struct NameResolver {
    package: String,
    /// Nested-name paths of the file's own declarations.
    self_paths: HashSet<Vec<String>>,
    /// Direct nested declaration names per path, for shadowing checks.
    children: HashMap<Vec<String>, Vec<String>>,
    /// Simple name -> the one class that owns its unqualified spelling.
    claims: IndexMap<String, ClassName>,
}

impl NameResolver {
    /// Run the collection pass over `root` and assign claims.
    pub fn new(package: impl Into<String>, root: &ClassSpec) -> Self {
        let package = package.into();
        let mut resolver = Self {
            package,
            self_paths: HashSet::new(),
            children: HashMap::new(),
            claims: IndexMap::new(),
        };

        // The file's own declarations claim their simple names first and
        // are never imported.
        let mut path = Vec::new();
        resolver.register_self(root, &mut path);

        // Everything else: first referenced in pre-order claims the
        // unqualified spelling; later holders of the same simple name
        // are fully qualified at every use site.
        let mut references = Vec::new();
        collect_class(root, &mut references);
        for reference in references {
            let simple = reference.simple_name().to_string();
            resolver.claims.entry(simple).or_insert(reference);
        }

        resolver
    }

    fn register_self(&mut self, spec: &ClassSpec, path: &mut Vec<String>) {
        if spec.name().is_empty() {
            // Anonymous bodies contribute no names.
            for nested in spec.nested_types() {
                self.register_self(nested, path);
            }
            return;
        }
        path.push(spec.name().to_string());
        self.self_paths.insert(path.clone());
        if !self.claims.contains_key(spec.name()) {
            let claimed = class_name_for(&self.package, path);
            self.claims.insert(spec.name().to_string(), claimed);
        }
        let children: Vec<String> = spec
            .nested_types()
            .iter()
            .map(|n| n.name().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        self.children.insert(path.clone(), children);
        for nested in spec.nested_types() {
            self.register_self(nested, path);
        }
        path.pop();
    }

    /// The import list: claimed symbols that are neither the file's own
    /// declarations nor package-local, sorted by canonical name.
    pub fn imports(&self) -> Vec<&ClassName> {
        let mut imports: Vec<&ClassName> = self
            .claims
            .values()
            .filter(|name| !name.package().is_empty())
            .filter(|name| name.package() != self.package)
            .collect();
        imports.sort_by_key(|name| name.canonical_name());
        imports
    }

    fn is_self(&self, name: &ClassName) -> bool {
        name.package() == self.package && self.self_paths.contains(name.simple_names())
    }

    /// Decide the in-context spelling of `name` with the given stack of
    /// enclosing declaration names (outermost first).
    pub fn resolve(&self, name: &ClassName, scope: &[String]) -> String {
        // The file's own declarations are spelled relative to the
        // deepest common ancestor with the current scope.
        if self.is_self(name) && !scope.is_empty() {
            let path = name.simple_names();
            if path[0] == scope[0] {
                let common = path
                    .iter()
                    .zip(scope.iter())
                    .take_while(|(a, b)| *a == *b)
                    .count();
                if common == path.len() {
                    // The current declaration or an open ancestor.
                    return name.simple_name().to_string();
                }
                return path[common..].join(".");
            }
        }

        // An unrelated symbol hidden by a declaration visible on the
        // scope stack is forced fully qualified at this site, even if it
        // owns the import elsewhere.
        if self.hidden_by_scope(name, scope) {
            return name.canonical_name();
        }

        if self.claims.get(name.simple_name()) == Some(name) {
            return name.simple_name().to_string();
        }
        name.canonical_name()
    }

    fn hidden_by_scope(&self, name: &ClassName, scope: &[String]) -> bool {
        let simple = name.simple_name();
        for depth in 0..scope.len() {
            if scope[depth] == simple {
                return true;
            }
            if let Some(children) = self.children.get(&scope[..=depth]) {
                if children.iter().any(|child| child == simple) {
                    return true;
                }
            }
        }
        false
    }
}

fn class_name_for(package: &str, path: &[String]) -> ClassName {
    let mut name = ClassName::new(package, path[0].clone());
    for part in &path[1..] {
        name = name.nested(part.clone());
    }
    name
}

/// Stable pre-order reference collection: annotations, type-variable
/// bounds, superclass, superinterfaces, enum constants, properties,
/// initializer blocks, functions, then nested declarations.
fn collect_class(spec: &ClassSpec, out: &mut Vec<ClassName>) {
    for annotation in spec.annotations() {
        collect_annotation(annotation, out);
    }
    for variable in spec.type_variables() {
        collect_type(variable, out);
    }
    if let Some(superclass) = spec.superclass() {
        collect_type(superclass, out);
    }
    for superinterface in spec.superinterfaces() {
        collect_type(superinterface, out);
    }
    for body in spec.enum_constants().values() {
        if let Some(args) = body.anonymous_args() {
            collect_block(args, out);
        }
        collect_class(body, out);
    }
    for property in spec.properties() {
        for annotation in property.annotations() {
            collect_annotation(annotation, out);
        }
        collect_type(property.type_ref(), out);
        if let Some(initializer) = property.initializer() {
            collect_block(initializer, out);
        }
    }
    for block in spec.static_blocks() {
        collect_block(block, out);
    }
    for block in spec.initializer_blocks() {
        collect_block(block, out);
    }
    for function in spec.functions() {
        collect_function(function, out);
    }
    for nested in spec.nested_types() {
        collect_class(nested, out);
    }
}

fn collect_function(function: &FunctionSpec, out: &mut Vec<ClassName>) {
    for annotation in function.annotations() {
        collect_annotation(annotation, out);
    }
    for variable in function.type_variables() {
        collect_type(variable, out);
    }
    if let Some(return_type) = function.return_type() {
        collect_type(return_type, out);
    }
    for param in function.params() {
        for annotation in param.annotations() {
            collect_annotation(annotation, out);
        }
        collect_type(param.type_ref(), out);
    }
    for exception in function.throws() {
        collect_type(exception, out);
    }
    if let Some(body) = function.body() {
        collect_block(body, out);
    }
    if let Some(default_value) = function.default_value() {
        collect_block(default_value, out);
    }
}

fn collect_annotation(annotation: &AnnotationSpec, out: &mut Vec<ClassName>) {
    out.push(annotation.class().clone());
    for values in annotation.members().values() {
        for value in values {
            collect_block(value, out);
        }
    }
}

fn collect_type(type_ref: &TypeRef, out: &mut Vec<ClassName>) {
    match type_ref {
        TypeRef::Class(name) => out.push(name.clone()),
        TypeRef::Parameterized { raw, args } => {
            out.push(raw.clone());
            for arg in args {
                collect_type(arg, out);
            }
        }
        TypeRef::Array(component) => collect_type(component, out),
        TypeRef::Variable { bounds, .. } => {
            for bound in bounds {
                collect_type(bound, out);
            }
        }
    }
}

fn collect_block(block: &CodeBlock, out: &mut Vec<ClassName>) {
    for token in block.tokens() {
        if let Token::Type(type_ref) = token {
            collect_type(type_ref, out);
        }
    }
}
