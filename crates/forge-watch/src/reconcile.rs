//! The reconciliation loop: watcher events to confirmed graph mutations
//!
//! A single consumer drains watch messages in arrival order and performs
//! every graph mutation, every manifest save, and every caller-decision
//! round-trip strictly sequentially. That serialization is the correctness
//! mechanism: the project only ever has one in-flight mutation.
//!
//! Recoverable failures never stop the loop. A not-found during a confirmed
//! removal or rename is logged and the event dropped; a failed manifest
//! save is logged and the in-memory graph stays ahead of disk until the
//! next successful save.

use crate::event::{Tree, WatchEvent, WatchMessage};
use crate::watcher::Subscription;
use forge_graph::{path, ExtensionMap, GameFileType, Project, SourceFileType};
use forge_store::ManifestStore;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

/// How long the consumer sleeps on an empty queue before re-checking the
/// stop flag.
const WAKE_INTERVAL: Duration = Duration::from_millis(200);

/// Caller's verdict on a proposed graph change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Ignore,
}

/// The change a decision is being asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposedChange {
    /// A newly created file would be added to the graph.
    Track,
    /// A deleted file would be removed from the graph.
    Untrack,
}

/// Context handed to the decision callback.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub tree: Tree,
    pub path: &'a str,
    pub change: ProposedChange,
}

/// Caller-supplied callbacks for decisions the reconciler cannot make
/// alone. Invoked synchronously from the consumer thread; they may block on
/// user input without losing queued events.
pub trait ReconcilerPrompt {
    /// Confirm or reject a proposed change for a created or deleted file.
    fn decide(&mut self, context: DecisionContext<'_>) -> Decision;

    /// Supply a type for a source file whose extension is not in the table.
    fn assume_source_type(&mut self, path: &str) -> SourceFileType;

    /// Supply a type for a game file whose extension is not in the table.
    fn assume_game_type(&mut self, path: &str) -> GameFileType;
}

/// The watched roots, used to turn absolute event paths back into the
/// tree-relative paths the graph tracks.
#[derive(Debug, Clone, Default)]
pub struct WatchRoots {
    pub source: Option<PathBuf>,
    pub game: Option<PathBuf>,
}

impl WatchRoots {
    /// Graph path for an event path: relative to the tree's root when the
    /// event path sits under it, otherwise the normalized path as given.
    fn graph_path(&self, tree: Tree, event_path: &Path) -> String {
        let root = match tree {
            Tree::Source => self.source.as_deref(),
            Tree::Game => self.game.as_deref(),
        };
        let relative = root
            .and_then(|root| event_path.strip_prefix(root).ok())
            .unwrap_or(event_path);
        path::normalize(relative)
    }
}

/// Single-consumer reconciliation engine.
///
/// Owns the project and its store for the duration of a watch session;
/// manual commands reload the manifest once the session ends.
pub struct Reconciler<P: ReconcilerPrompt> {
    project: Project,
    store: ManifestStore,
    types: ExtensionMap,
    roots: WatchRoots,
    prompt: P,
}

impl<P: ReconcilerPrompt> Reconciler<P> {
    pub fn new(
        project: Project,
        store: ManifestStore,
        types: ExtensionMap,
        roots: WatchRoots,
        prompt: P,
    ) -> Self {
        Self {
            project,
            store,
            types,
            roots,
            prompt,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Give the project back when the session is over.
    pub fn into_project(self) -> Project {
        self.project
    }

    /// Drain messages until the stop flag is raised or the watcher goes
    /// away. An event already dequeued is always processed to completion
    /// before the stop flag is honored.
    pub fn run(&mut self, events: &Subscription, stop: &AtomicBool) {
        while !stop.load(Ordering::Relaxed) {
            match events.recv_timeout(WAKE_INTERVAL) {
                Ok(message) => self.handle_message(message),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("reconciliation loop exited");
    }

    /// Process one watch message.
    pub fn handle_message(&mut self, message: WatchMessage) {
        match message {
            WatchMessage::Event(event) => self.handle_event(event),
            WatchMessage::Error { tree, message } => {
                tracing::warn!(tree = ?tree, %message, "watcher reported an error");
            }
        }
    }

    /// Apply the per-event state machine to one filesystem event.
    pub fn handle_event(&mut self, event: WatchEvent) {
        let tree = event.tree();
        match event {
            WatchEvent::Created { path, .. } => {
                // Directory creations raise events too; only files are tracked.
                if path.is_dir() {
                    tracing::debug!(%tree, path = %path.display(), "directory create ignored");
                    return;
                }
                let path = self.roots.graph_path(tree, &path);
                self.on_created(tree, &path);
            }
            WatchEvent::Deleted { path, .. } => {
                let path = self.roots.graph_path(tree, &path);
                self.on_deleted(tree, &path);
            }
            WatchEvent::Changed { path, .. } => {
                // Content changes never affect the correspondence graph.
                tracing::debug!(%tree, path = %path.display(), "change ignored");
            }
            WatchEvent::Renamed { old_path, path, .. } => {
                let old_path = self.roots.graph_path(tree, &old_path);
                let new_path = self.roots.graph_path(tree, &path);
                self.on_renamed(tree, &old_path, &new_path);
            }
        }
    }

    fn on_created(&mut self, tree: Tree, event_path: &str) {
        let tracked = match tree {
            Tree::Source => self.project.source_file_by_path(event_path).is_some(),
            Tree::Game => self.project.game_file_by_path(event_path).is_some(),
        };
        if tracked {
            // Nothing to reconcile; re-creation of a tracked path.
            tracing::debug!(%tree, path = event_path, "created path already tracked");
            return;
        }

        let decision = |prompt: &mut P| {
            prompt.decide(DecisionContext {
                tree,
                path: event_path,
                change: ProposedChange::Track,
            })
        };

        let outcome = match tree {
            Tree::Source => {
                let file_type = match self.types.source_type(event_path) {
                    Some(inferred) => inferred,
                    None => self.prompt.assume_source_type(event_path),
                };
                if decision(&mut self.prompt) == Decision::Ignore {
                    tracing::debug!(%tree, path = event_path, "create ignored by caller");
                    return;
                }
                self.project
                    .add_source_file(event_path, file_type)
                    .map(|_| ())
            }
            Tree::Game => {
                let file_type = match self.types.game_type(event_path) {
                    Some(inferred) => inferred,
                    None => self.prompt.assume_game_type(event_path),
                };
                if decision(&mut self.prompt) == Decision::Ignore {
                    tracing::debug!(%tree, path = event_path, "create ignored by caller");
                    return;
                }
                self.project
                    .add_game_file(event_path, file_type)
                    .map(|_| ())
            }
        };

        match outcome {
            Ok(()) => {
                tracing::debug!(%tree, path = event_path, "file tracked");
                self.persist();
            }
            Err(err) => tracing::warn!(%tree, path = event_path, error = %err, "create event dropped"),
        }
    }

    fn on_deleted(&mut self, tree: Tree, event_path: &str) {
        let tracked = match tree {
            Tree::Source => self.project.source_file_by_path(event_path).is_some(),
            Tree::Game => self.project.game_file_by_path(event_path).is_some(),
        };
        if !tracked {
            // Untracked deletions are silent: no prompt, no mutation.
            tracing::debug!(%tree, path = event_path, "deleted path not tracked");
            return;
        }

        let decision = self.prompt.decide(DecisionContext {
            tree,
            path: event_path,
            change: ProposedChange::Untrack,
        });
        if decision == Decision::Ignore {
            tracing::debug!(%tree, path = event_path, "delete ignored by caller");
            return;
        }

        let outcome = match tree {
            Tree::Source => self
                .project
                .remove_source_file_by_path(event_path)
                .map(|_| ()),
            Tree::Game => self
                .project
                .remove_game_file_by_path(event_path)
                .map(|_| ()),
        };

        match outcome {
            Ok(()) => {
                tracing::debug!(%tree, path = event_path, "file untracked");
                self.persist();
            }
            // A concurrent manual command may have removed it first.
            Err(err) => tracing::warn!(%tree, path = event_path, error = %err, "delete event dropped"),
        }
    }

    /// Renames apply unconditionally: the id, not the path, anchors the
    /// correspondence, so there is nothing for the caller to decide.
    fn on_renamed(&mut self, tree: Tree, old_path: &str, new_path: &str) {
        let outcome = match tree {
            Tree::Source => self.project.rename_source_file(old_path, new_path),
            Tree::Game => self.project.rename_game_file(old_path, new_path),
        };
        match outcome {
            Ok(()) => {
                tracing::debug!(%tree, from = old_path, to = new_path, "file renamed");
                self.persist();
            }
            Err(err) => {
                tracing::warn!(%tree, from = old_path, to = new_path, error = %err, "rename event dropped");
            }
        }
    }

    /// Write-through save after every accepted mutation. On failure the
    /// in-memory graph keeps the change; the next successful save catches
    /// the manifest up.
    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.project) {
            tracing::error!(
                manifest = %self.store.path().display(),
                error = %err,
                "manifest save failed; graph is ahead of disk"
            );
        }
    }
}
