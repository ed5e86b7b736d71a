// Architecture model types
//
// These types are an immutable snapshot of a codebase's structure: packages,
// classes, fields, methods, and the annotations and modifiers attached to
// them. An importer produces the snapshot; the exporters only read it.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Simple name of the sentinel class carrying package-level annotations.
pub const PACKAGE_DESCRIPTOR: &str = "package-info";

/// An annotation, identified by its fully-qualified type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub type_name: String,
}

impl Annotation {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
        }
    }
}

/// A visibility or behavior tag attached to a class, field or method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Synchronized,
    Volatile,
    Transient,
    Native,
    Strictfp,
}

impl Modifier {
    /// Symbolic name as it appears in exported documents.
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Public => "PUBLIC",
            Modifier::Protected => "PROTECTED",
            Modifier::Private => "PRIVATE",
            Modifier::Static => "STATIC",
            Modifier::Final => "FINAL",
            Modifier::Abstract => "ABSTRACT",
            Modifier::Synchronized => "SYNCHRONIZED",
            Modifier::Volatile => "VOLATILE",
            Modifier::Transient => "TRANSIENT",
            Modifier::Native => "NATIVE",
            Modifier::Strictfp => "STRICTFP",
        }
    }
}

/// A field declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Fully-qualified field name (`p.A.x`)
    pub name: String,
    /// Fully-qualified declared type
    pub type_name: String,
    pub annotations: HashSet<Annotation>,
    pub modifiers: HashSet<Modifier>,
}

impl Field {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            annotations: HashSet::new(),
            modifiers: HashSet::new(),
        }
    }

    pub fn with_annotation(mut self, type_name: &str) -> Self {
        self.annotations.insert(Annotation::new(type_name));
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }
}

/// A method declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    /// Fully-qualified method name (`p.A.run(int)`)
    pub name: String,
    /// Parameter types in declaration order. This is the call signature and
    /// the only collection in the model whose order is significant.
    pub parameter_types: Vec<String>,
    /// Fully-qualified return type
    pub return_type: String,
    pub annotations: HashSet<Annotation>,
    pub modifiers: HashSet<Modifier>,
}

impl Method {
    pub fn new(name: &str, return_type: &str) -> Self {
        Self {
            name: name.to_string(),
            parameter_types: Vec::new(),
            return_type: return_type.to_string(),
            annotations: HashSet::new(),
            modifiers: HashSet::new(),
        }
    }

    pub fn with_parameter(mut self, type_name: &str) -> Self {
        self.parameter_types.push(type_name.to_string());
        self
    }

    pub fn with_annotation(mut self, type_name: &str) -> Self {
        self.annotations.insert(Annotation::new(type_name));
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }
}

/// A class and its members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Fully-qualified class name
    pub name: String,
    /// Owning package, derived from the fully-qualified name. Empty for the
    /// default package.
    pub package: String,
    pub annotations: HashSet<Annotation>,
    pub modifiers: HashSet<Modifier>,
    /// Fields keyed by fully-qualified field name
    pub fields: HashMap<String, Field>,
    /// Methods keyed by fully-qualified method name
    pub methods: HashMap<String, Method>,
}

impl Class {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            package: package_of(name).to_string(),
            annotations: HashSet::new(),
            modifiers: HashSet::new(),
            fields: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Name without the package prefix
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn with_annotation(mut self, type_name: &str) -> Self {
        self.annotations.insert(Annotation::new(type_name));
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.insert(method.name.clone(), method);
        self
    }
}

/// A package and the annotations collected from its descriptor pseudo-class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Dotted package path
    pub name: String,
    pub annotations: HashSet<Annotation>,
}

impl Package {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            annotations: HashSet::new(),
        }
    }
}

/// The root snapshot: every class of one source tree, keyed by name.
///
/// Read-only for the duration of an export; only importers build and
/// populate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureModel {
    classes: HashMap<String, Class>,
}

impl ArchitectureModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_classes(classes: impl IntoIterator<Item = Class>) -> Self {
        let mut model = Self::new();
        for class in classes {
            model.insert(class);
        }
        model
    }

    /// Add a class, returning the previous entry with the same name if any.
    pub fn insert(&mut self, class: Class) -> Option<Class> {
        self.classes.insert(class.name.clone(), class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class_named(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    /// Look up a class by package and simple name.
    pub fn class_in_package(&self, package: &str, simple_name: &str) -> Option<&Class> {
        let name = if package.is_empty() {
            simple_name.to_string()
        } else {
            format!("{}.{}", package, simple_name)
        };
        self.classes.get(&name)
    }

    /// All classes whose owning package is `package`.
    pub fn classes_in_package<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a Class> {
        self.classes.values().filter(move |c| c.package == package)
    }
}

/// Package portion of a fully-qualified name. Empty for names without a dot.
pub fn package_of(name: &str) -> &str {
    name.rsplit_once('.').map(|(package, _)| package).unwrap_or("")
}
