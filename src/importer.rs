// Importing architecture models from descriptor trees
//
// The export engine is importer-agnostic: anything that can produce an
// ArchitectureModel from a source location satisfies ArchitectureImporter,
// and tests run against hand-built fixture models. DirectoryImporter is the
// shipping implementation; it walks a compiled-output tree for
// `*.class.json` metadata descriptors emitted by the build pipeline.

use crate::config::ImportConfig;
use crate::error::{Error, Result};
use crate::model::{ArchitectureModel, Class, Field, Method, Modifier};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A source of architecture models.
pub trait ArchitectureImporter {
    /// Produce a model covering every class reachable under `path`.
    fn import(&self, path: &Path) -> Result<ArchitectureModel>;
}

/// On-disk class metadata descriptor, one JSON document per class.
#[derive(Debug, Deserialize)]
struct ClassDescriptor {
    name: String,
    #[serde(default)]
    annotations: Vec<String>,
    #[serde(default)]
    modifiers: Vec<Modifier>,
    #[serde(default)]
    fields: Vec<FieldDescriptor>,
    #[serde(default)]
    methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Deserialize)]
struct FieldDescriptor {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    annotations: Vec<String>,
    #[serde(default)]
    modifiers: Vec<Modifier>,
}

#[derive(Debug, Deserialize)]
struct MethodDescriptor {
    name: String,
    #[serde(default)]
    parameter_types: Vec<String>,
    return_type: String,
    #[serde(default)]
    annotations: Vec<String>,
    #[serde(default)]
    modifiers: Vec<Modifier>,
}

impl From<ClassDescriptor> for Class {
    fn from(descriptor: ClassDescriptor) -> Self {
        let mut class = Class::new(&descriptor.name);
        for annotation in &descriptor.annotations {
            class = class.with_annotation(annotation);
        }
        for modifier in descriptor.modifiers {
            class = class.with_modifier(modifier);
        }
        for field in descriptor.fields {
            let mut built = Field::new(&field.name, &field.type_name);
            for annotation in &field.annotations {
                built = built.with_annotation(annotation);
            }
            for modifier in field.modifiers {
                built = built.with_modifier(modifier);
            }
            class = class.with_field(built);
        }
        for method in descriptor.methods {
            let mut built = Method::new(&method.name, &method.return_type);
            for parameter in &method.parameter_types {
                built = built.with_parameter(parameter);
            }
            for annotation in &method.annotations {
                built = built.with_annotation(annotation);
            }
            for modifier in method.modifiers {
                built = built.with_modifier(modifier);
            }
            class = class.with_method(built);
        }
        class
    }
}

/// Imports a model from a directory of class metadata descriptors.
pub struct DirectoryImporter {
    include: Vec<glob::Pattern>,
    exclude: Vec<glob::Pattern>,
}

impl DirectoryImporter {
    pub fn new(config: &ImportConfig) -> Result<Self> {
        let include = config
            .include
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let exclude = config
            .exclude
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { include, exclude })
    }

    fn matches(&self, relative: &Path) -> bool {
        self.include.iter().any(|p| p.matches_path(relative))
            && !self.exclude.iter().any(|p| p.matches_path(relative))
    }
}

impl ArchitectureImporter for DirectoryImporter {
    fn import(&self, path: &Path) -> Result<ArchitectureModel> {
        if !path.is_dir() {
            return Err(Error::PathNotFound(path.to_path_buf()));
        }

        let mut model = ArchitectureModel::new();
        for entry in WalkDir::new(path) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(path).unwrap_or(entry.path());
            if !self.matches(relative) {
                continue;
            }

            let contents = std::fs::read_to_string(entry.path())?;
            let descriptor: ClassDescriptor = serde_json::from_str(&contents)
                .map_err(|e| Error::import(entry.path(), e.to_string()))?;
            debug!(class = %descriptor.name, file = %entry.path().display(), "imported descriptor");

            if let Some(replaced) = model.insert(descriptor.into()) {
                warn!(class = %replaced.name, "duplicate class descriptor replaced");
            }
        }

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn importer() -> DirectoryImporter {
        DirectoryImporter::new(&ImportConfig::default()).expect("importer")
    }

    fn write_descriptor(dir: &Path, file: &str, contents: &str) {
        let path = dir.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, contents).expect("write descriptor");
    }

    #[test]
    fn test_import_missing_directory() {
        let result = importer().import(Path::new("/nonexistent/classes"));
        assert!(matches!(result, Err(Error::PathNotFound(_))));
    }

    #[test]
    fn test_import_empty_directory_yields_empty_model() {
        let dir = TempDir::new().expect("temp dir");
        let model = importer().import(dir.path()).expect("import");
        assert!(model.is_empty());
    }

    #[test]
    fn test_import_descriptor_tree() {
        let dir = TempDir::new().expect("temp dir");
        write_descriptor(
            dir.path(),
            "p/A.class.json",
            r#"{
                "name": "p.A",
                "modifiers": ["PUBLIC"],
                "fields": [
                    {"name": "p.A.x", "type": "int", "modifiers": ["PUBLIC", "FINAL"]}
                ],
                "methods": [
                    {
                        "name": "p.A.f(int, java.lang.String)",
                        "parameter_types": ["int", "java.lang.String"],
                        "return_type": "void",
                        "annotations": ["java.lang.Deprecated"]
                    }
                ]
            }"#,
        );
        write_descriptor(
            dir.path(),
            "p/package-info.class.json",
            r#"{"name": "p.package-info", "annotations": ["p.Layer"]}"#,
        );

        let model = importer().import(dir.path()).expect("import");
        assert_eq!(model.len(), 2);

        let class = model.class_named("p.A").expect("class p.A");
        assert!(class.modifiers.contains(&Modifier::Public));
        assert_eq!(class.fields.len(), 1);

        let field = &class.fields["p.A.x"];
        assert_eq!(field.type_name, "int");
        assert_eq!(field.modifiers.len(), 2);

        let method = &class.methods["p.A.f(int, java.lang.String)"];
        assert_eq!(method.parameter_types, vec!["int", "java.lang.String"]);
        assert_eq!(method.return_type, "void");
    }

    #[test]
    fn test_non_matching_files_are_skipped() {
        let dir = TempDir::new().expect("temp dir");
        write_descriptor(dir.path(), "notes.txt", "not a descriptor");
        write_descriptor(dir.path(), "data.json", r#"{"unrelated": true}"#);

        let model = importer().import(dir.path()).expect("import");
        assert!(model.is_empty());
    }

    #[test]
    fn test_excluded_files_are_skipped() {
        let dir = TempDir::new().expect("temp dir");
        write_descriptor(
            dir.path(),
            "target/p/A.class.json",
            r#"{"name": "p.A"}"#,
        );

        let model = importer().import(dir.path()).expect("import");
        assert!(model.is_empty());
    }

    #[test]
    fn test_malformed_descriptor_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        write_descriptor(dir.path(), "p/Bad.class.json", "{ not json");

        let result = importer().import(dir.path());
        assert!(matches!(result, Err(Error::Import { .. })));
    }

    #[test]
    fn test_descriptor_without_name_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        write_descriptor(dir.path(), "p/NoName.class.json", r#"{"modifiers": []}"#);

        let result = importer().import(dir.path());
        assert!(matches!(result, Err(Error::Import { .. })));
    }
}
