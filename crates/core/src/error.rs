//! Error type for artifact loading, encoding, and search.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by `qstock-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An artifact file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact file is not valid JSON for its expected shape.
    #[error("failed to parse {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Artifacts parsed but are inconsistent with each other or with limits.
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    /// The encoding pipeline received input it cannot process.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// No historical record carries the requested date.
    #[error("Date {0} not found in dataset.")]
    DateNotFound(String),
}
