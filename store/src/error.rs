//! Error types for run state and configuration persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A snapshot that must exist was not found.
    #[error("snapshot not found: {}", .0.display())]
    MissingSnapshot(PathBuf),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
