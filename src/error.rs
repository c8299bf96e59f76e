//! Crate error type
//!
//! Only the edges fail: loading tuning and touching the progress file.
//! The simulation itself has no fallible operations.

use std::path::PathBuf;

/// Errors raised while loading configuration or persisting progress
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Filesystem error with the path that caused it
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A tuning value outside its legal range
    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),
}

/// Result type for fallible crate operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
