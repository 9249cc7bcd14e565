//! Error types for forge-store

use std::path::PathBuf;

/// Result type for forge-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while persisting or loading a manifest
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No manifest exists where one is required
    #[error("No project manifest found at {path}")]
    ProjectNotFound { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Lock acquisition failed for the manifest file
    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    /// Manifest serialization failed
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
