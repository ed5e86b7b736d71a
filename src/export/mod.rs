// Export orchestration
//
// Chooses the grouping granularity (classes vs packages) and the document
// format (JSON vs XML), runs the matching serializer, and writes the result
// to its destination.

pub mod json;
pub mod policy;
pub mod xml;

pub use json::JsonExporter;
pub use policy::{Detail, DetailPolicy};
pub use xml::XmlExporter;

use crate::config::ExportFormat;
use crate::error::Result;
use crate::model::ArchitectureModel;
use crate::packages::PackageAggregator;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Selection parameters for one export: the three independent axes
/// controlling output shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub minimal: bool,
    pub group_by_package: bool,
    pub format: ExportFormat,
}

/// Runs one export of a model to a destination.
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Export `model` to the file at `destination`. The file is created (or
    /// truncated), written through a buffer, and flushed before returning.
    pub fn export(&self, model: &ArchitectureModel, destination: &Path) -> Result<ExportReport> {
        let file = File::create(destination)?;
        let mut writer = BufWriter::new(file);
        let report = self.export_to_writer(model, &mut writer)?;
        writer.flush()?;
        Ok(report)
    }

    /// Export `model` to any writer. Exactly one serializer entry point runs
    /// per call.
    pub fn export_to_writer<W: Write>(
        &self,
        model: &ArchitectureModel,
        writer: W,
    ) -> Result<ExportReport> {
        let policy = DetailPolicy::new(self.options.minimal);

        let entities = if self.options.group_by_package {
            let packages = PackageAggregator::new().aggregate(model);
            match self.options.format {
                ExportFormat::Json => {
                    let exporter = JsonExporter::new(policy);
                    let document = exporter.export_packages(model, &packages);
                    exporter.write_to(writer, &document)?;
                }
                ExportFormat::Xml => {
                    XmlExporter::new(policy).export_packages(writer, model, &packages)?;
                }
            }
            packages.len()
        } else {
            match self.options.format {
                ExportFormat::Json => {
                    let exporter = JsonExporter::new(policy);
                    let document = exporter.export_classes(model.classes());
                    exporter.write_to(writer, &document)?;
                }
                ExportFormat::Xml => {
                    XmlExporter::new(policy).export_classes(writer, model.classes())?;
                }
            }
            model.len()
        };

        Ok(ExportReport {
            entities,
            grouped_by_package: self.options.group_by_package,
            format: self.options.format,
        })
    }
}

/// Report of what one export produced
#[derive(Debug)]
pub struct ExportReport {
    pub entities: usize,
    pub grouped_by_package: bool,
    pub format: ExportFormat,
}

impl ExportReport {
    pub fn summary(&self) -> String {
        let noun = if self.grouped_by_package {
            "packages"
        } else {
            "classes"
        };
        format!("Exported {} {} as {}", self.entities, noun, self.format)
    }
}
