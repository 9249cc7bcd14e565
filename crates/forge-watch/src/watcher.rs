//! Recursive watcher over the source and game trees
//!
//! Wraps one native [`notify`] watcher per configured root and fans every
//! translated event out to all subscribers. The notify callback runs on
//! threads owned by the OS notification backend; it only translates and
//! enqueues, never blocks on I/O or user interaction.

use crate::error::{Error, Result};
use crate::event::{self, Tree, WatchMessage};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

type SubscriberSet = Arc<Mutex<Vec<(u64, Sender<WatchMessage>)>>>;

/// Deliver a message to every live subscriber.
///
/// Unbounded channels make `send` non-blocking; a failed send means the
/// subscription was dropped, so the sender is pruned.
fn publish(subscribers: &SubscriberSet, message: &WatchMessage) {
    let mut subscribers = match subscribers.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    subscribers.retain(|(_, sender)| sender.send(message.clone()).is_ok());
}

/// A registered consumer of watch messages.
///
/// Receives every message published after the moment of subscription; there
/// is no replay. Dropping the subscription unregisters it.
pub struct Subscription {
    id: u64,
    rx: Receiver<WatchMessage>,
    subscribers: Weak<Mutex<Vec<(u64, Sender<WatchMessage>)>>>,
}

impl Subscription {
    /// Wait up to `timeout` for the next message.
    pub fn recv_timeout(&self, timeout: Duration) -> std::result::Result<WatchMessage, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Take the next message if one is already queued.
    pub fn try_recv(&self) -> std::result::Result<WatchMessage, TryRecvError> {
        self.rx.try_recv()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            let mut subscribers = match subscribers.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Watches the source root and the game root recursively, publishing
/// [`WatchMessage`]s to all subscribers.
///
/// Either root may be unset; at least one must be configured to start.
pub struct DualTreeWatcher {
    source_root: Option<PathBuf>,
    game_root: Option<PathBuf>,
    subscribers: SubscriberSet,
    next_subscription_id: u64,
    // Native handles, present only while running.
    watchers: Vec<RecommendedWatcher>,
}

impl DualTreeWatcher {
    pub fn new(source_root: Option<PathBuf>, game_root: Option<PathBuf>) -> Self {
        Self {
            source_root,
            game_root,
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_subscription_id: 0,
            watchers: Vec::new(),
        }
    }

    /// Register a new subscriber. All subscribers receive every message.
    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = self.next_subscription_id;
        self.next_subscription_id += 1;

        let mut subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.push((id, tx));

        Subscription {
            id,
            rx,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Begin raising events. Calling while already running is a no-op.
    ///
    /// A tree whose native watch cannot be established is reported to
    /// subscribers as a watcher error and skipped; the other tree still
    /// starts. Fails only when no tree is configured or every configured
    /// tree failed.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }
        if self.source_root.is_none() && self.game_root.is_none() {
            return Err(Error::NoWatchRoots);
        }

        let roots = [
            (Tree::Source, self.source_root.clone()),
            (Tree::Game, self.game_root.clone()),
        ];
        let mut configured = 0;
        for (tree, root) in roots {
            let Some(root) = root else { continue };
            configured += 1;
            match self.watch_tree(tree, &root) {
                Ok(watcher) => self.watchers.push(watcher),
                Err(err) => {
                    tracing::warn!(%tree, path = %root.display(), error = %err, "failed to start tree watch");
                    publish(
                        &self.subscribers,
                        &WatchMessage::Error {
                            tree: Some(tree),
                            message: err.to_string(),
                        },
                    );
                }
            }
        }

        if self.watchers.is_empty() && configured > 0 {
            return Err(Error::AllTreesFailed);
        }
        tracing::debug!(trees = self.watchers.len(), "watch started");
        Ok(())
    }

    /// Stop raising events and release the native watch handles.
    pub fn stop(&mut self) {
        if !self.watchers.is_empty() {
            tracing::debug!("watch stopped");
        }
        self.watchers.clear();
    }

    pub fn is_running(&self) -> bool {
        !self.watchers.is_empty()
    }

    fn watch_tree(&self, tree: Tree, root: &Path) -> Result<RecommendedWatcher> {
        let subscribers = Arc::clone(&self.subscribers);
        let mut watcher = RecommendedWatcher::new(
            move |result: std::result::Result<notify::Event, notify::Error>| match result {
                Ok(raw) => {
                    for watch_event in event::translate(tree, &raw) {
                        publish(&subscribers, &WatchMessage::Event(watch_event));
                    }
                }
                Err(err) => {
                    // Non-fatal: the unaffected tree keeps watching.
                    publish(
                        &subscribers,
                        &WatchMessage::Error {
                            tree: Some(tree),
                            message: err.to_string(),
                        },
                    );
                }
            },
            notify::Config::default(),
        )
        .map_err(|source| Error::Watch {
            tree,
            path: root.to_path_buf(),
            source,
        })?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|source| Error::Watch {
                tree,
                path: root.to_path_buf(),
                source,
            })?;
        Ok(watcher)
    }
}

impl Drop for DualTreeWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
