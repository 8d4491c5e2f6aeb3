//! Read-only access to the current state from anywhere
//!
//! The store keeps its state in a `tokio::sync::watch` cell. A [`StateReader`]
//! is a receiver on that cell, so deferred actions, timers and view code can
//! read the latest committed snapshot without borrowing the store.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

pub struct StateReader<S> {
    rx: watch::Receiver<Arc<S>>,
}

impl<S> StateReader<S> {
    pub(crate) fn new(rx: watch::Receiver<Arc<S>>) -> Self {
        Self { rx }
    }

    /// Latest committed snapshot
    pub fn get(&self) -> Arc<S> {
        Arc::clone(&self.rx.borrow())
    }

    /// Project a value out of the latest snapshot (hook-style selector)
    pub fn select<T, F>(&self, selector: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let snapshot = self.get();
        selector(&snapshot)
    }

    /// Wait until a new snapshot is committed
    ///
    /// Returns `false` once the store has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

impl<S> Clone for StateReader<S> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for StateReader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateReader").field(&self.get()).finish()
    }
}
