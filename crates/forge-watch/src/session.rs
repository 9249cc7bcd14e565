//! A running watch session: watcher plus consumer thread
//!
//! Wires a [`DualTreeWatcher`] subscription to a [`Reconciler`] on a
//! dedicated thread. Stopping releases the native handles first (no more
//! enqueues), then raises the stop flag and joins the consumer, which
//! finishes the event it already dequeued before exiting.

use crate::error::{Error, Result};
use crate::reconcile::{Reconciler, ReconcilerPrompt, WatchRoots};
use crate::watcher::DualTreeWatcher;
use forge_graph::{ExtensionMap, Project};
use forge_store::ManifestStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

pub struct WatchSession {
    watcher: DualTreeWatcher,
    stop: Arc<AtomicBool>,
    consumer: Option<JoinHandle<Project>>,
}

impl WatchSession {
    /// Start watching and reconciling.
    ///
    /// The project and store move to the consumer thread for the session's
    /// lifetime; [`WatchSession::stop`] gives the project back.
    pub fn start<P>(
        project: Project,
        store: ManifestStore,
        types: ExtensionMap,
        roots: WatchRoots,
        prompt: P,
    ) -> Result<Self>
    where
        P: ReconcilerPrompt + Send + 'static,
    {
        let mut watcher = DualTreeWatcher::new(roots.source.clone(), roots.game.clone());
        let subscription = watcher.subscribe();
        watcher.start()?;

        let stop = Arc::new(AtomicBool::new(false));
        let consumer_stop = Arc::clone(&stop);
        let consumer = std::thread::Builder::new()
            .name("forge-reconciler".into())
            .spawn(move || {
                let mut reconciler = Reconciler::new(project, store, types, roots, prompt);
                reconciler.run(&subscription, &consumer_stop);
                reconciler.into_project()
            })
            .map_err(Error::Spawn)?;

        Ok(Self {
            watcher,
            stop,
            consumer: Some(consumer),
        })
    }

    /// Stop the session and return the reconciled project.
    pub fn stop(mut self) -> Result<Project> {
        self.watcher.stop();
        self.stop.store(true, Ordering::Relaxed);
        match self.consumer.take() {
            Some(handle) => handle.join().map_err(|_| Error::ConsumerFailed),
            None => Err(Error::ConsumerFailed),
        }
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.watcher.stop();
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.consumer.take() {
            let _ = handle.join();
        }
    }
}
