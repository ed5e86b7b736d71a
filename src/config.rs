use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub import: ImportConfig,
    pub export: ExportConfig,
    pub output: OutputConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

/// Import settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Export settings: the three axes controlling output shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub minimal: bool,
    pub group_by_package: bool,
}

/// Output destination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub file_stem: String,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Xml,
}

impl ExportFormat {
    /// File extension for this format, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Xml => "xml",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "xml" => Ok(ExportFormat::Xml),
            other => Err(Error::other(format!("Unknown format: {}", other))),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
            description: None,
            version: None,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            include: vec!["**/*.class.json".to_string()],
            exclude: vec![".git/**".to_string(), "target/**".to_string()],
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            minimal: false,
            group_by_package: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_stem: "architecture".to_string(),
        }
    }
}

impl OutputConfig {
    /// Destination path for the given format: `<directory>/<stem>.<ext>`.
    pub fn destination(&self, format: ExportFormat) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.file_stem, format.extension()))
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        format: Option<ExportFormat>,
        minimal: bool,
        group_by_package: bool,
    ) {
        if let Some(fmt) = format {
            self.export.format = fmt;
        }

        if minimal {
            self.export.minimal = true;
        }

        if group_by_package {
            self.export.group_by_package = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.import.include.is_empty() {
            return Err(Error::config_validation("at least one include pattern required"));
        }

        if self.output.file_stem.is_empty() {
            return Err(Error::config_validation("output file stem must not be empty"));
        }

        Ok(())
    }
}
