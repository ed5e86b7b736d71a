// JSON exporter
//
// Renders the model as nested key-value maps: entities keyed by their
// fully-qualified names, list-valued `annotations`, `modifiers` and
// `parameter_types`, scalar `type` and `return_type`. The document is
// pretty-printed when written.

use crate::error::Result;
use crate::export::policy::{Detail, DetailPolicy};
use crate::model::{Annotation, ArchitectureModel, Class, Modifier, Package};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::io::Write;

/// Serializes a model into JSON documents.
pub struct JsonExporter {
    policy: DetailPolicy,
}

impl JsonExporter {
    pub fn new(policy: DetailPolicy) -> Self {
        Self { policy }
    }

    /// Root document with a single `classes` key.
    pub fn export_classes<'a>(&self, classes: impl Iterator<Item = &'a Class>) -> Value {
        let mut root = Map::new();
        root.insert("classes".to_string(), self.classes_value(classes));
        Value::Object(root)
    }

    /// Root document with a single `packages` key. Outside minimal mode each
    /// package embeds the sub-export of its member classes, looked up in
    /// `model`.
    pub fn export_packages(&self, model: &ArchitectureModel, packages: &[Package]) -> Value {
        let mut entries = Map::new();
        for package in packages {
            let mut entry = Map::new();
            entry.insert(
                "annotations".to_string(),
                annotations_value(&package.annotations),
            );
            if self.policy.emits(Detail::PackageClasses) {
                entry.insert(
                    "classes".to_string(),
                    self.classes_value(model.classes_in_package(&package.name)),
                );
            }
            entries.insert(package.name.clone(), Value::Object(entry));
        }
        let mut root = Map::new();
        root.insert("packages".to_string(), Value::Object(entries));
        Value::Object(root)
    }

    /// Pretty-print a document to `writer`, flushing before returning.
    pub fn write_to<W: Write>(&self, mut writer: W, document: &Value) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, document)?;
        writer.flush()?;
        Ok(())
    }

    fn classes_value<'a>(&self, classes: impl Iterator<Item = &'a Class>) -> Value {
        let mut entries = Map::new();
        for class in classes {
            entries.insert(class.name.clone(), self.class_value(class));
        }
        Value::Object(entries)
    }

    fn class_value(&self, class: &Class) -> Value {
        let mut entry = Map::new();
        entry.insert(
            "annotations".to_string(),
            annotations_value(&class.annotations),
        );
        entry.insert("fields".to_string(), self.fields_value(class));
        entry.insert("methods".to_string(), self.methods_value(class));
        if self.policy.emits(Detail::Modifiers) {
            entry.insert("modifiers".to_string(), modifiers_value(&class.modifiers));
        }
        Value::Object(entry)
    }

    fn fields_value(&self, class: &Class) -> Value {
        let mut entries = Map::new();
        for (name, field) in &class.fields {
            let mut entry = Map::new();
            entry.insert(
                "annotations".to_string(),
                annotations_value(&field.annotations),
            );
            if self.policy.emits(Detail::Modifiers) {
                entry.insert("modifiers".to_string(), modifiers_value(&field.modifiers));
            }
            if self.policy.emits(Detail::FieldType) {
                entry.insert("type".to_string(), Value::String(field.type_name.clone()));
            }
            entries.insert(name.clone(), Value::Object(entry));
        }
        Value::Object(entries)
    }

    fn methods_value(&self, class: &Class) -> Value {
        let mut entries = Map::new();
        for (name, method) in &class.methods {
            let mut entry = Map::new();
            entry.insert(
                "annotations".to_string(),
                annotations_value(&method.annotations),
            );
            if self.policy.emits(Detail::Modifiers) {
                entry.insert("modifiers".to_string(), modifiers_value(&method.modifiers));
            }
            if self.policy.emits(Detail::ParameterTypes) {
                entry.insert(
                    "parameter_types".to_string(),
                    Value::Array(
                        method
                            .parameter_types
                            .iter()
                            .map(|t| Value::String(t.clone()))
                            .collect(),
                    ),
                );
            }
            if self.policy.emits(Detail::ReturnType) {
                entry.insert(
                    "return_type".to_string(),
                    Value::String(method.return_type.clone()),
                );
            }
            entries.insert(name.clone(), Value::Object(entry));
        }
        Value::Object(entries)
    }
}

fn annotations_value(annotations: &HashSet<Annotation>) -> Value {
    Value::Array(
        annotations
            .iter()
            .map(|a| Value::String(a.type_name.clone()))
            .collect(),
    )
}

fn modifiers_value(modifiers: &HashSet<Modifier>) -> Value {
    Value::Array(
        modifiers
            .iter()
            .map(|m| Value::String(m.name().to_string()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, Method};
    use serde_json::json;

    fn exporter(minimal: bool) -> JsonExporter {
        JsonExporter::new(DetailPolicy::new(minimal))
    }

    fn sample_class() -> Class {
        Class::new("p.A")
            .with_modifier(Modifier::Public)
            .with_field(
                Field::new("p.A.x", "int")
                    .with_modifier(Modifier::Public)
                    .with_modifier(Modifier::Final),
            )
            .with_method(
                Method::new("p.A.f(int, java.lang.String)", "void")
                    .with_parameter("int")
                    .with_parameter("java.lang.String")
                    .with_annotation("java.lang.Deprecated"),
            )
    }

    #[test]
    fn test_root_has_single_classes_key() {
        let model = ArchitectureModel::from_classes([sample_class()]);
        let document = exporter(false).export_classes(model.classes());
        let root = document.as_object().expect("root object");
        assert_eq!(root.len(), 1);
        assert!(root.contains_key("classes"));
    }

    #[test]
    fn test_full_class_shape() {
        let model = ArchitectureModel::from_classes([sample_class()]);
        let document = exporter(false).export_classes(model.classes());

        let class = &document["classes"]["p.A"];
        assert_eq!(class["annotations"], json!([]));
        assert_eq!(class["modifiers"], json!(["PUBLIC"]));

        let field = &class["fields"]["p.A.x"];
        assert_eq!(field["annotations"], json!([]));
        assert_eq!(field["type"], json!("int"));
        let field_modifiers = field["modifiers"].as_array().expect("modifiers array");
        assert_eq!(field_modifiers.len(), 2);
        assert!(field_modifiers.contains(&json!("PUBLIC")));
        assert!(field_modifiers.contains(&json!("FINAL")));

        let method = &class["methods"]["p.A.f(int, java.lang.String)"];
        assert_eq!(method["annotations"], json!(["java.lang.Deprecated"]));
        assert_eq!(method["return_type"], json!("void"));
    }

    #[test]
    fn test_parameter_types_preserve_declaration_order() {
        let model = ArchitectureModel::from_classes([sample_class()]);
        let document = exporter(false).export_classes(model.classes());
        let method = &document["classes"]["p.A"]["methods"]["p.A.f(int, java.lang.String)"];
        assert_eq!(
            method["parameter_types"],
            json!(["int", "java.lang.String"])
        );
    }

    #[test]
    fn test_minimal_strips_detail_but_keeps_members() {
        let model = ArchitectureModel::from_classes([sample_class()]);
        let document = exporter(true).export_classes(model.classes());

        let class = &document["classes"]["p.A"];
        assert!(class.get("modifiers").is_none());
        assert!(class.get("fields").is_some());
        assert!(class.get("methods").is_some());

        let field = &class["fields"]["p.A.x"];
        assert_eq!(field["annotations"], json!([]));
        assert!(field.get("modifiers").is_none());
        assert!(field.get("type").is_none());

        let method = &class["methods"]["p.A.f(int, java.lang.String)"];
        assert_eq!(method["annotations"], json!(["java.lang.Deprecated"]));
        assert!(method.get("modifiers").is_none());
        assert!(method.get("parameter_types").is_none());
        assert!(method.get("return_type").is_none());
    }

    #[test]
    fn test_package_export_embeds_classes_when_full() {
        let model = ArchitectureModel::from_classes([
            sample_class(),
            Class::new("p.package-info").with_annotation("p.Layer"),
        ]);
        let packages = crate::packages::PackageAggregator::new().aggregate(&model);
        let document = exporter(false).export_packages(&model, &packages);

        let package = &document["packages"]["p"];
        assert_eq!(package["annotations"], json!(["p.Layer"]));
        let classes = package["classes"].as_object().expect("classes object");
        assert!(classes.contains_key("p.A"));
        assert!(classes.contains_key("p.package-info"));
    }

    #[test]
    fn test_minimal_package_export_has_no_classes_subtree() {
        let model = ArchitectureModel::from_classes([sample_class()]);
        let packages = crate::packages::PackageAggregator::new().aggregate(&model);
        let document = exporter(true).export_packages(&model, &packages);

        let package = &document["packages"]["p"];
        assert_eq!(package["annotations"], json!([]));
        assert!(package.get("classes").is_none());
    }

    #[test]
    fn test_package_without_descriptor_has_empty_annotation_list() {
        let model = ArchitectureModel::from_classes([Class::new("q.B")]);
        let packages = crate::packages::PackageAggregator::new().aggregate(&model);
        let document = exporter(true).export_packages(&model, &packages);
        assert_eq!(document["packages"]["q"]["annotations"], json!([]));
    }

    #[test]
    fn test_empty_model_exports_empty_object() {
        let model = ArchitectureModel::new();
        let document = exporter(false).export_classes(model.classes());
        assert_eq!(document, json!({ "classes": {} }));
    }

    #[test]
    fn test_write_to_pretty_prints() {
        let model = ArchitectureModel::from_classes([sample_class()]);
        let json = exporter(false).export_classes(model.classes());
        let mut buffer = Vec::new();
        exporter(false).write_to(&mut buffer, &json).expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        assert!(text.contains('\n'));
        assert!(text.contains("  \"classes\""));
    }
}
