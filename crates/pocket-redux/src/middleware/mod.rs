//! Middleware system
//!
//! Middleware sits between `dispatch` and the reducer, allowing side effects,
//! deferred actions, logging and other cross-cutting concerns to be handled in
//! a composable way.
//!
//! ```text
//! dispatch → Middleware 1 → Middleware 2 → … → Reducer → State → Subscribers
//! ```
//!
//! The chain is an ordered list; the middleware added first wraps outermost.
//! Each middleware gets the item, a [`Context`] with `get_state`/`dispatch`, and
//! a [`Next`] continuation. It can:
//! - inspect the item and the current state
//! - pass the item on with `next.run(item)`, zero or more times
//! - replace the item with a different one before passing it on
//! - dispatch further items through the [`Context`]
//!
//! ## Example
//!
//! ```rust
//! use pocket_redux::{Action, Context, Dispatchable, Middleware, Next, Outcome, Result};
//!
//! struct DropEverything;
//!
//! impl<S, A: Action> Middleware<S, A> for DropEverything {
//!     fn handle(
//!         &mut self,
//!         item: Dispatchable<S, A>,
//!         _ctx: &Context<'_, S, A>,
//!         _next: Next<'_, S, A>,
//!     ) -> Result<Outcome<A>> {
//!         log::warn!("dropping {}", item.kind());
//!         Ok(Outcome::Dropped)
//!     }
//! }
//! ```

use std::sync::Arc;
use tokio::sync::watch;

use crate::action::{Action, Dispatchable, Outcome};
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::reader::StateReader;
use crate::store::Core;

pub mod logging;
pub mod thunk;

/// Middleware trait - handles items before they reach the reducer
pub trait Middleware<S, A>: Send {
    /// Handle one dispatched item
    ///
    /// # Parameters
    /// - `item`: the action or deferred action being dispatched
    /// - `ctx`: read access to the current state and a dispatcher
    /// - `next`: the rest of the chain, ending at the reducer
    ///
    /// # Returns
    /// Whatever the caller of `dispatch` should see, usually the result of `next.run`.
    fn handle(
        &mut self,
        item: Dispatchable<S, A>,
        ctx: &Context<'_, S, A>,
        next: Next<'_, S, A>,
    ) -> Result<Outcome<A>>;
}

/// Store access handed to middleware
pub struct Context<'a, S, A> {
    state: &'a watch::Sender<Arc<S>>,
    dispatcher: &'a Dispatcher<S, A>,
}

impl<'a, S, A> Context<'a, S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    pub(crate) fn new(state: &'a watch::Sender<Arc<S>>, dispatcher: &'a Dispatcher<S, A>) -> Self {
        Self { state, dispatcher }
    }

    pub fn get_state(&self) -> Arc<S> {
        Arc::clone(&self.state.borrow())
    }

    pub fn reader(&self) -> StateReader<S> {
        StateReader::new(self.state.subscribe())
    }

    pub fn dispatcher(&self) -> &Dispatcher<S, A> {
        self.dispatcher
    }

    /// Queue an item; it runs through the whole chain after the current cycle
    pub fn dispatch(&self, item: impl Into<Dispatchable<S, A>>) {
        self.dispatcher.dispatch(item);
    }
}

/// The remaining part of the chain
///
/// Calling [`Next::run`] forwards to the following middleware, or to the
/// reducer after the last one.
pub struct Next<'a, S, A> {
    chain: &'a mut [Box<dyn Middleware<S, A>>],
    core: &'a Core<S, A>,
    ctx: &'a Context<'a, S, A>,
}

impl<'a, S, A> Next<'a, S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    pub(crate) fn new(
        chain: &'a mut [Box<dyn Middleware<S, A>>],
        core: &'a Core<S, A>,
        ctx: &'a Context<'a, S, A>,
    ) -> Self {
        Self { chain, core, ctx }
    }

    pub fn run(&mut self, item: Dispatchable<S, A>) -> Result<Outcome<A>> {
        match self.chain.split_first_mut() {
            Some((head, rest)) => {
                let next = Next {
                    chain: rest,
                    core: self.core,
                    ctx: self.ctx,
                };
                head.handle(item, self.ctx, next)
            }
            None => self.core.commit(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::reducer_fn;
    use crate::store::Store;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Step {
        Add(i64),
        Noop,
    }

    impl Action for Step {
        fn kind(&self) -> &'static str {
            match self {
                Step::Add(_) => "test/ADD",
                Step::Noop => "test/NOOP",
            }
        }
    }

    fn store() -> Store<i64, Step> {
        Store::new(reducer_fn(
            || Some(0),
            |state: &Arc<i64>, step: &Step| match step {
                Step::Add(n) => Arc::new(**state + n),
                Step::Noop => Arc::clone(state),
            },
        ))
        .unwrap()
    }

    struct Recorder {
        name: &'static str,
        trace: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware<i64, Step> for Recorder {
        fn handle(
            &mut self,
            item: Dispatchable<i64, Step>,
            _ctx: &Context<'_, i64, Step>,
            mut next: Next<'_, i64, Step>,
        ) -> Result<Outcome<Step>> {
            self.trace.lock().push(format!("{} before", self.name));
            let outcome = next.run(item);
            self.trace.lock().push(format!("{} after", self.name));
            outcome
        }
    }

    struct Swallow;

    impl Middleware<i64, Step> for Swallow {
        fn handle(
            &mut self,
            _item: Dispatchable<i64, Step>,
            _ctx: &Context<'_, i64, Step>,
            _next: Next<'_, i64, Step>,
        ) -> Result<Outcome<Step>> {
            Ok(Outcome::Dropped)
        }
    }

    struct Twice;

    impl Middleware<i64, Step> for Twice {
        fn handle(
            &mut self,
            item: Dispatchable<i64, Step>,
            _ctx: &Context<'_, i64, Step>,
            mut next: Next<'_, i64, Step>,
        ) -> Result<Outcome<Step>> {
            if let Dispatchable::Action(step) = &item {
                next.run(Dispatchable::Action(step.clone()))?;
            }
            next.run(item)
        }
    }

    struct Rewrite;

    impl Middleware<i64, Step> for Rewrite {
        fn handle(
            &mut self,
            item: Dispatchable<i64, Step>,
            _ctx: &Context<'_, i64, Step>,
            mut next: Next<'_, i64, Step>,
        ) -> Result<Outcome<Step>> {
            match item {
                Dispatchable::Action(Step::Add(n)) => next.run(Step::Add(n * 10).into()),
                other => next.run(other),
            }
        }
    }

    #[test]
    fn test_first_middleware_wraps_outermost() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut store = store();
        store.add_middleware(Recorder {
            name: "outer",
            trace: Arc::clone(&trace),
        });
        store.add_middleware(Recorder {
            name: "inner",
            trace: Arc::clone(&trace),
        });

        store.dispatch(Step::Add(1)).unwrap();

        assert_eq!(
            *trace.lock(),
            vec!["outer before", "inner before", "inner after", "outer after"]
        );
        assert_eq!(*store.state(), 1);
    }

    #[test]
    fn test_middleware_not_calling_next_drops_action() {
        let mut store = store();
        store.add_middleware(Swallow);
        let before = store.state();

        let outcome = store.dispatch(Step::Add(5)).unwrap();

        assert_eq!(outcome, Outcome::Dropped);
        assert!(Arc::ptr_eq(&before, &store.state()));
        assert_eq!(store.reducer_calls(), 0);
    }

    #[test]
    fn test_middleware_calling_next_twice_commits_twice() {
        let mut store = store();
        store.add_middleware(Twice);

        store.dispatch(Step::Add(2)).unwrap();

        assert_eq!(*store.state(), 4);
        assert_eq!(store.reducer_calls(), 2);
    }

    #[test]
    fn test_middleware_can_replace_action() {
        let mut store = store();
        store.add_middleware(Rewrite);

        let outcome = store.dispatch(Step::Add(2)).unwrap();

        assert_eq!(outcome, Outcome::Reduced(Step::Add(20)));
        assert_eq!(*store.state(), 20);
    }

    #[test]
    fn test_rewrite_passes_other_actions_through() {
        let mut store = store();
        store.add_middleware(Rewrite);
        let before = store.state();

        let outcome = store.dispatch(Step::Noop).unwrap();

        assert_eq!(outcome, Outcome::Reduced(Step::Noop));
        assert!(Arc::ptr_eq(&before, &store.state()));
        assert_eq!(store.reducer_calls(), 1);
    }
}
