//! Plain number counter with deferred action creators
//!
//! `increase_async`/`decrease_async` return thunks; the store needs
//! [`ThunkMiddleware`] in its chain and a tokio runtime to run them.

use pocket_redux::{
    LogJournal, LoggingMiddleware, Middleware, Reducer, Store, Thunk, ThunkMiddleware,
};
use std::sync::Arc;
use std::time::Duration;

pub use crate::counter::{decrease, increase, CounterAction};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

pub type AsyncCounterStore = Store<i64, CounterAction>;

/// Increase by one once `delay` has elapsed
pub fn increase_async(delay: Duration) -> Thunk<i64, CounterAction> {
    Thunk::new("counter/INCREASE_ASYNC", move |dispatcher, _state| {
        dispatcher.dispatch_after(delay, increase())?;
        Ok(())
    })
}

/// Decrease by one once `delay` has elapsed
pub fn decrease_async(delay: Duration) -> Thunk<i64, CounterAction> {
    Thunk::new("counter/DECREASE_ASYNC", move |dispatcher, _state| {
        dispatcher.dispatch_after(delay, decrease())?;
        Ok(())
    })
}

pub fn reduce(state: &Arc<i64>, action: &CounterAction) -> Arc<i64> {
    match action {
        CounterAction::Increase => state
            .checked_add(1)
            .map_or_else(|| Arc::clone(state), Arc::new),
        CounterAction::Decrease => state
            .checked_sub(1)
            .map_or_else(|| Arc::clone(state), Arc::new),
    }
}

#[derive(Debug, Default)]
pub struct AsyncCounterReducer;

impl Reducer<i64, CounterAction> for AsyncCounterReducer {
    fn initial_state(&self) -> Option<i64> {
        Some(0)
    }

    fn reduce(&self, state: &Arc<i64>, action: &CounterAction) -> Arc<i64> {
        reduce(state, action)
    }
}

/// Store with the logger outside the thunk middleware
pub fn configure_store(journal: Option<LogJournal>) -> pocket_redux::Result<AsyncCounterStore> {
    let logger = match journal {
        Some(journal) => LoggingMiddleware::new().with_journal(journal),
        None => LoggingMiddleware::new(),
    };
    let middleware: Vec<Box<dyn Middleware<i64, CounterAction>>> =
        vec![Box::new(logger), Box::new(ThunkMiddleware::new())];
    Store::with_middleware(AsyncCounterReducer, middleware)
}
