// XML exporter
//
// Renders the model as a hierarchical markup document. Every entity element
// carries an explicit <name> text child (the JSON form uses the name as a
// map key instead), and list containers hold repeated singular leaves.

use crate::error::{Error, Result};
use crate::export::policy::{Detail, DetailPolicy};
use crate::model::{Annotation, ArchitectureModel, Class, Modifier, Package};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::HashSet;
use std::io::Write;

/// Serializes a model into indented XML documents.
pub struct XmlExporter {
    policy: DetailPolicy,
}

impl XmlExporter {
    pub fn new(policy: DetailPolicy) -> Self {
        Self { policy }
    }

    /// Document with a `<classes>` root holding one `<class>` per entry.
    pub fn export_classes<'a, W: Write>(
        &self,
        target: W,
        classes: impl Iterator<Item = &'a Class>,
    ) -> Result<()> {
        let mut writer = Writer::new_with_indent(target, b' ', 2);
        write_declaration(&mut writer)?;
        let classes: Vec<&Class> = classes.collect();
        self.write_classes(&mut writer, &classes)?;
        finish(writer)
    }

    /// Document with a `<packages>` root. Outside minimal mode each package
    /// embeds a `<classes>` sub-tree of its members, looked up in `model`.
    pub fn export_packages<W: Write>(
        &self,
        target: W,
        model: &ArchitectureModel,
        packages: &[Package],
    ) -> Result<()> {
        let mut writer = Writer::new_with_indent(target, b' ', 2);
        write_declaration(&mut writer)?;
        if packages.is_empty() {
            write_empty(&mut writer, "packages")?;
        } else {
            write_start(&mut writer, "packages")?;
            for package in packages {
                self.write_package(&mut writer, model, package)?;
            }
            write_end(&mut writer, "packages")?;
        }
        finish(writer)
    }

    fn write_classes<W: Write>(&self, writer: &mut Writer<W>, classes: &[&Class]) -> Result<()> {
        if classes.is_empty() {
            return write_empty(writer, "classes");
        }
        write_start(writer, "classes")?;
        for class in classes {
            self.write_class(writer, class)?;
        }
        write_end(writer, "classes")
    }

    fn write_class<W: Write>(&self, writer: &mut Writer<W>, class: &Class) -> Result<()> {
        write_start(writer, "class")?;
        write_text_element(writer, "name", &class.name)?;
        self.write_annotations(writer, &class.annotations)?;
        self.write_fields(writer, class)?;
        self.write_methods(writer, class)?;
        if self.policy.emits(Detail::Modifiers) {
            self.write_modifiers(writer, &class.modifiers)?;
        }
        write_end(writer, "class")
    }

    fn write_fields<W: Write>(&self, writer: &mut Writer<W>, class: &Class) -> Result<()> {
        if class.fields.is_empty() {
            return write_empty(writer, "fields");
        }
        write_start(writer, "fields")?;
        for field in class.fields.values() {
            write_start(writer, "field")?;
            write_text_element(writer, "name", &field.name)?;
            self.write_annotations(writer, &field.annotations)?;
            if self.policy.emits(Detail::Modifiers) {
                self.write_modifiers(writer, &field.modifiers)?;
            }
            if self.policy.emits(Detail::FieldType) {
                write_text_element(writer, "type", &field.type_name)?;
            }
            write_end(writer, "field")?;
        }
        write_end(writer, "fields")
    }

    fn write_methods<W: Write>(&self, writer: &mut Writer<W>, class: &Class) -> Result<()> {
        if class.methods.is_empty() {
            return write_empty(writer, "methods");
        }
        write_start(writer, "methods")?;
        for method in class.methods.values() {
            write_start(writer, "method")?;
            write_text_element(writer, "name", &method.name)?;
            self.write_annotations(writer, &method.annotations)?;
            if self.policy.emits(Detail::Modifiers) {
                self.write_modifiers(writer, &method.modifiers)?;
            }
            if self.policy.emits(Detail::ParameterTypes) {
                write_string_list(writer, "parameter_types", "parameter_type", &method.parameter_types)?;
            }
            if self.policy.emits(Detail::ReturnType) {
                write_text_element(writer, "return_type", &method.return_type)?;
            }
            write_end(writer, "method")?;
        }
        write_end(writer, "methods")
    }

    fn write_package<W: Write>(
        &self,
        writer: &mut Writer<W>,
        model: &ArchitectureModel,
        package: &Package,
    ) -> Result<()> {
        write_start(writer, "package")?;
        write_text_element(writer, "name", &package.name)?;
        self.write_annotations(writer, &package.annotations)?;
        if self.policy.emits(Detail::PackageClasses) {
            let members: Vec<&Class> = model.classes_in_package(&package.name).collect();
            self.write_classes(writer, &members)?;
        }
        write_end(writer, "package")
    }

    fn write_annotations<W: Write>(
        &self,
        writer: &mut Writer<W>,
        annotations: &HashSet<Annotation>,
    ) -> Result<()> {
        let names: Vec<String> = annotations.iter().map(|a| a.type_name.clone()).collect();
        write_string_list(writer, "annotations", "annotation", &names)
    }

    fn write_modifiers<W: Write>(
        &self,
        writer: &mut Writer<W>,
        modifiers: &HashSet<Modifier>,
    ) -> Result<()> {
        let names: Vec<String> = modifiers.iter().map(|m| m.name().to_string()).collect();
        write_string_list(writer, "modifiers", "modifier", &names)
    }
}

fn write_declaration<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| Error::xml(format!("write error: {e}")))
}

fn write_start<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(|e| Error::xml(format!("write error: {e}")))
}

fn write_end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| Error::xml(format!("write error: {e}")))
}

fn write_empty<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer
        .write_event(Event::Empty(BytesStart::new(name)))
        .map_err(|e| Error::xml(format!("write error: {e}")))
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    write_start(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| Error::xml(format!("write error: {e}")))?;
    write_end(writer, name)
}

/// A list container with one leaf element per value; collapses to an empty
/// element when there are no values.
fn write_string_list<W: Write>(
    writer: &mut Writer<W>,
    container: &str,
    leaf: &str,
    values: &[String],
) -> Result<()> {
    if values.is_empty() {
        return write_empty(writer, container);
    }
    write_start(writer, container)?;
    for value in values {
        write_text_element(writer, leaf, value)?;
    }
    write_end(writer, container)
}

fn finish<W: Write>(writer: Writer<W>) -> Result<()> {
    let mut target = writer.into_inner();
    target.write_all(b"\n")?;
    target.flush()?;
    Ok(())
}
