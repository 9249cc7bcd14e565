//! Error types for forge-watch

use crate::event::Tree;
use std::path::PathBuf;

/// Result type for forge-watch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while starting or running a watch session
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither the source nor the game root is configured
    #[error("No watch roots configured")]
    NoWatchRoots,

    /// The native watch could not be established for one tree
    #[error("Failed to watch {tree} tree at {path}: {source}")]
    Watch {
        tree: Tree,
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// Every configured tree failed to start; the session cannot run
    #[error("All configured watch trees failed to start")]
    AllTreesFailed,

    /// The reconciliation consumer thread could not be spawned
    #[error("Failed to spawn reconciliation thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The reconciliation consumer thread panicked
    #[error("Reconciliation thread terminated abnormally")]
    ConsumerFailed,

    /// Graph error from forge-graph
    #[error(transparent)]
    Graph(#[from] forge_graph::Error),

    /// Persistence error from forge-store
    #[error(transparent)]
    Store(#[from] forge_store::Error),
}
