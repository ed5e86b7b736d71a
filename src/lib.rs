//! Blueprint - export architecture metadata from compiled codebases
//!
//! Reads a tree of class metadata descriptors and exports the packages,
//! classes, fields and methods it describes as a JSON or XML document.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod importer;
pub mod model;
pub mod packages;

// Re-export main types
pub use config::{Config, ExportFormat};
pub use error::{Error, Result};
pub use export::{DetailPolicy, ExportOptions, ExportReport, Exporter, JsonExporter, XmlExporter};
pub use importer::{ArchitectureImporter, DirectoryImporter};
pub use model::{Annotation, ArchitectureModel, Class, Field, Method, Modifier, Package};
pub use packages::PackageAggregator;
