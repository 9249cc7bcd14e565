//! Live reconciliation engine for Asset Forge
//!
//! Watches the source and game asset trees, turns raw OS notifications
//! into a typed event stream, and drives confirmed mutations into the
//! project graph:
//!
//! ```text
//! DualTreeWatcher --(channel)--> Reconciler --> Project mutation --> ManifestStore
//! ```
//!
//! Two concurrency domains meet here. Notify callbacks run on OS-owned
//! threads and only translate and enqueue. A single consumer thread owns
//! the project and the store, applies mutations one at a time in arrival
//! order, and performs the (possibly blocking) caller-decision
//! round-trips. See [`reconcile`] for the per-event state machine.

pub mod error;
pub mod event;
pub mod logging;
pub mod reconcile;
pub mod session;
pub mod watcher;

pub use error::{Error, Result};
pub use event::{Tree, WatchEvent, WatchMessage};
pub use reconcile::{
    Decision, DecisionContext, ProposedChange, Reconciler, ReconcilerPrompt, WatchRoots,
};
pub use session::WatchSession;
pub use watcher::{DualTreeWatcher, Subscription};
