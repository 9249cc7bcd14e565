//! Error types for forge-graph

/// Result type for forge-graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when mutating or querying the project graph
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file with this path (compared case-insensitively) is already tracked
    #[error("A file with path '{path}' is already tracked by the project")]
    DuplicatePath { path: String },

    /// Source file lookup by id or path failed
    #[error("Source file not found: {key}")]
    SourceFileNotFound { key: String },

    /// Game file lookup by id or path failed
    #[error("Game file not found: {key}")]
    GameFileNotFound { key: String },
}
