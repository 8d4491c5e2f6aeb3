//! Reducer - pure function that produces new state from current state + action

use std::sync::Arc;

/// A pure state transition
///
/// `reduce` must return `Arc::clone(state)` when the action changes nothing, so
/// consumers can detect "no change" with `Arc::ptr_eq`.
pub trait Reducer<S, A>: Send {
    /// The state a store starts from. `None` means the reducer has no default,
    /// which the store rejects at construction.
    fn initial_state(&self) -> Option<S>;

    fn reduce(&self, state: &Arc<S>, action: &A) -> Arc<S>;
}

/// Reducer built from two closures, see [`reducer_fn`]
pub struct FnReducer<I, F> {
    init: I,
    reduce: F,
}

/// Build a reducer from an initial-state function and a transition function
pub fn reducer_fn<S, A, I, F>(init: I, reduce: F) -> FnReducer<I, F>
where
    I: Fn() -> Option<S> + Send,
    F: Fn(&Arc<S>, &A) -> Arc<S> + Send,
{
    FnReducer { init, reduce }
}

impl<S, A, I, F> Reducer<S, A> for FnReducer<I, F>
where
    I: Fn() -> Option<S> + Send,
    F: Fn(&Arc<S>, &A) -> Arc<S> + Send,
{
    fn initial_state(&self) -> Option<S> {
        (self.init)()
    }

    fn reduce(&self, state: &Arc<S>, action: &A) -> Arc<S> {
        (self.reduce)(state, action)
    }
}
