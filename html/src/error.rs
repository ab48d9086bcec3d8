//! Error type for report generation.

use std::path::PathBuf;

use audit_report_store::StoreError;

/// Errors that abort a report-generation step.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The output directory could not be created.
    #[error("failed to create output directory '{}': {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An HTML artifact could not be opened or written.
    #[error("failed to write '{}': {source}", .path.display())]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured stylesheet could not be read.
    #[error("failed to read stylesheet '{}': {source}", .path.display())]
    ReadStylesheet {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias for results with [`ReportError`].
pub type Result<T> = std::result::Result<T, ReportError>;
