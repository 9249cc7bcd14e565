//! Typed watch events and translation from raw OS notifications
//!
//! Raw `notify` events are translated 1:1 into [`WatchEvent`]; no
//! deduplication or coalescing happens here. Rapid-fire duplicates, if a
//! platform produces them, are the reconciler's concern.

use notify::event::{EventKind, ModifyKind, RenameMode};
use std::fmt;
use std::path::PathBuf;

/// Which of the two watched subtrees an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tree {
    Source,
    Game,
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Source => write!(f, "source"),
            Tree::Game => write!(f, "game"),
        }
    }
}

/// A normalized filesystem change in one of the watched trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    Created { path: PathBuf, tree: Tree },
    Deleted { path: PathBuf, tree: Tree },
    Changed { path: PathBuf, tree: Tree },
    Renamed { old_path: PathBuf, path: PathBuf, tree: Tree },
}

impl WatchEvent {
    pub fn tree(&self) -> Tree {
        match self {
            WatchEvent::Created { tree, .. }
            | WatchEvent::Deleted { tree, .. }
            | WatchEvent::Changed { tree, .. }
            | WatchEvent::Renamed { tree, .. } => *tree,
        }
    }
}

/// What subscribers receive: either a filesystem event or a non-fatal
/// watcher-level error. An error on one tree never stops the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchMessage {
    Event(WatchEvent),
    Error { tree: Option<Tree>, message: String },
}

/// Translate one raw notification into zero or more typed events.
///
/// Rename reporting differs per backend: inotify pairs old and new paths in
/// a single `RenameMode::Both` event, while other platforms may emit
/// separate `From`/`To` halves. The halves degrade to `Deleted`/`Created`,
/// which reconcile to the same end state.
pub(crate) fn translate(tree: Tree, event: &notify::Event) -> Vec<WatchEvent> {
    let paths = &event.paths;
    match event.kind {
        EventKind::Create(_) => paths
            .iter()
            .map(|p| WatchEvent::Created { path: p.clone(), tree })
            .collect(),
        EventKind::Remove(_) => paths
            .iter()
            .map(|p| WatchEvent::Deleted { path: p.clone(), tree })
            .collect(),
        EventKind::Modify(ModifyKind::Name(mode)) => match (mode, paths.as_slice()) {
            (RenameMode::Both, [old, new, ..]) => vec![WatchEvent::Renamed {
                old_path: old.clone(),
                path: new.clone(),
                tree,
            }],
            (RenameMode::From, paths) => paths
                .iter()
                .map(|p| WatchEvent::Deleted { path: p.clone(), tree })
                .collect(),
            (RenameMode::To, paths) => paths
                .iter()
                .map(|p| WatchEvent::Created { path: p.clone(), tree })
                .collect(),
            // Unqualified rename with both endpoints present
            (_, [old, new]) => vec![WatchEvent::Renamed {
                old_path: old.clone(),
                path: new.clone(),
                tree,
            }],
            (_, paths) => paths
                .iter()
                .map(|p| WatchEvent::Changed { path: p.clone(), tree })
                .collect(),
        },
        EventKind::Modify(_) | EventKind::Any => paths
            .iter()
            .map(|p| WatchEvent::Changed { path: p.clone(), tree })
            .collect(),
        EventKind::Access(_) | EventKind::Other => Vec::new(),
    }
}
