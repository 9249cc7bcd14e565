//! Project graph for Asset Forge
//!
//! This crate owns the in-memory representation of one tracked modding
//! project: the source-tree and game-tree file collections, the links
//! between them, and the invariants every mutation preserves:
//!
//! - no two files in a collection share a path (case-insensitive)
//! - every link target exists; removing a game file cascade-deletes its
//!   links in the same step
//! - ids are immutable for an entity's lifetime; paths may change
//!
//! It also hosts the fuzzy correspondence matcher used to suggest likely
//! source↔game pairs, and the extension→type inference table injected into
//! the reconciliation layer.

pub mod error;
pub mod file;
pub mod matcher;
pub mod path;
pub mod project;
pub mod types;

pub use error::{Error, Result};
pub use file::{GameFile, SourceFile, TrackedFile};
pub use matcher::{SIMILARITY_THRESHOLD, rank_similar, similarity_score};
pub use project::{GameTarget, Project};
pub use types::{ExtensionMap, GameFileType, GameName, ProjectSettings, SourceFileType};
