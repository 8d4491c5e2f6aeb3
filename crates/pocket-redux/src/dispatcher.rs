//! Dispatcher allows middleware, deferred actions and view code to dispatch
//! actions back to the store
//!
//! Dispatched items are queued on a channel owned by the store. Items queued
//! while a dispatch is running are processed right after it, each as its own
//! dispatch cycle that re-enters the middleware chain from the beginning.
//! Items queued later (e.g. from a timer) are picked up by
//! [`crate::Store::drain_pending`] or [`crate::Store::process_next`].

use std::fmt;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::action::{Action, Dispatchable};
use crate::error::{Result, StoreError};

pub struct Dispatcher<S, A> {
    tx: mpsc::UnboundedSender<Dispatchable<S, A>>,
}

impl<S, A> Dispatcher<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    pub(crate) fn new(tx: mpsc::UnboundedSender<Dispatchable<S, A>>) -> Self {
        Self { tx }
    }

    /// Queue an action or deferred action for the store
    pub fn dispatch(&self, item: impl Into<Dispatchable<S, A>>) {
        let item = item.into();
        let kind = item.kind();
        if self.tx.send(item).is_err() {
            log::error!("Dispatcher: failed to dispatch {}: store dropped", kind);
        }
    }

    /// Queue an item once `delay` has elapsed
    ///
    /// Spawns onto the current tokio runtime; fails with
    /// [`StoreError::NoRuntime`] when called outside of one.
    pub fn dispatch_after(
        &self,
        delay: Duration,
        item: impl Into<Dispatchable<S, A>>,
    ) -> Result<JoinHandle<()>> {
        let item = item.into();
        let Ok(runtime) = Handle::try_current() else {
            return Err(StoreError::NoRuntime(item.kind()));
        };

        let dispatcher = self.clone();
        Ok(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            dispatcher.dispatch(item);
        }))
    }

    /// Whether the owning store is still alive
    pub fn is_connected(&self) -> bool {
        !self.tx.is_closed()
    }
}

impl<S, A> Clone for Dispatcher<S, A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<S, A> fmt::Debug for Dispatcher<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}
