//! Reporter configuration.
//!
//! Can be built in code or loaded from YAML.
//!
//! # Example YAML
//!
//! ```yaml
//! output_directory: reports/a11y
//! stylesheet: assets/report.css
//! title: Nightly accessibility audit
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where and how a report set is written.
///
/// # Examples
///
/// ```
/// use audit_report_store::ReporterConfig;
///
/// let config = ReporterConfig::new("reports").with_title("Nightly");
/// assert_eq!(config.artifact_path("index.html"), std::path::Path::new("reports/index.html"));
/// assert_eq!(config.title.as_deref(), Some("Nightly"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// Directory receiving every artifact. Created on demand.
    pub output_directory: PathBuf,
    /// CSS file inlined into every page instead of the built-in stylesheet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<PathBuf>,
    /// Heading shown on index pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ReporterConfig {
    pub fn new(output_directory: impl Into<PathBuf>) -> Self {
        Self {
            output_directory: output_directory.into(),
            stylesheet: None,
            title: None,
        }
    }

    pub fn with_stylesheet(mut self, stylesheet: impl Into<PathBuf>) -> Self {
        self.stylesheet = Some(stylesheet.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Path of an artifact inside the output directory.
    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.output_directory.join(file_name)
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::StoreError::IoError) if the file cannot be
    /// read, or [`YamlError`](crate::StoreError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::StoreError::IoError) if the file cannot be
    /// written, or [`YamlError`](crate::StoreError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
