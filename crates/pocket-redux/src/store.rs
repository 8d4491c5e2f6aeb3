use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use crate::action::{Action, Dispatchable, Outcome};
use crate::dispatcher::Dispatcher;
use crate::error::{Result, StoreError};
use crate::middleware::{Context, Middleware, Next};
use crate::reader::StateReader;
use crate::reducer::Reducer;
use crate::subscribers::{Subscribers, Subscription};

/// Reducer stage at the innermost end of the middleware chain
pub(crate) struct Core<S, A> {
    reducer: Box<dyn Reducer<S, A>>,
    state: watch::Sender<Arc<S>>,
    subscribers: Subscribers,
    reducer_calls: AtomicU64,
}

impl<S, A> Core<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Reduce, swap the state reference, then notify subscribers
    pub(crate) fn commit(&self, item: Dispatchable<S, A>) -> Result<Outcome<A>> {
        let action = match item {
            Dispatchable::Action(action) => action,
            Dispatchable::Thunk(thunk) => {
                log::error!(
                    "Deferred action {} reached the reducer without ThunkMiddleware",
                    thunk.label()
                );
                return Err(StoreError::UnhandledThunk(thunk.label()));
            }
        };

        let current = Arc::clone(&self.state.borrow());
        let next = self.reducer.reduce(&current, &action);
        self.state.send_replace(next);
        self.reducer_calls.fetch_add(1, Ordering::Relaxed);

        self.subscribers.notify();
        Ok(Outcome::Reduced(action))
    }
}

/// Store - holds application state and manages the dispatch loop
///
/// - Centralized state, replaced by a new `Arc` on every committed change
/// - Actions flow through the middleware chain before reaching the reducer
/// - Subscribers run after every committed transition, in registration order
///
/// ```rust
/// use std::sync::Arc;
/// use pocket_redux::{reducer_fn, Action, Store};
///
/// #[derive(Debug)]
/// struct Bump;
///
/// impl Action for Bump {
///     fn kind(&self) -> &'static str {
///         "BUMP"
///     }
/// }
///
/// let mut store = Store::new(reducer_fn(
///     || Some(0u32),
///     |state: &Arc<u32>, _: &Bump| Arc::new(**state + 1),
/// ))?;
/// store.dispatch(Bump)?;
/// assert_eq!(*store.state(), 1);
/// # Ok::<(), pocket_redux::StoreError>(())
/// ```
pub struct Store<S, A> {
    core: Core<S, A>,
    middleware: Vec<Box<dyn Middleware<S, A>>>,
    dispatcher: Dispatcher<S, A>,
    pending: mpsc::UnboundedReceiver<Dispatchable<S, A>>,
}

impl<S, A> Store<S, A>
where
    S: Send + Sync + 'static,
    A: Action,
{
    /// Create a store; the initial state comes from the reducer
    pub fn new<R>(reducer: R) -> Result<Self>
    where
        R: Reducer<S, A> + 'static,
    {
        Self::with_middleware(reducer, Vec::new())
    }

    /// Create a store with its middleware chain; the first entry wraps outermost
    pub fn with_middleware<R>(reducer: R, middleware: Vec<Box<dyn Middleware<S, A>>>) -> Result<Self>
    where
        R: Reducer<S, A> + 'static,
    {
        let Some(initial) = reducer.initial_state() else {
            log::error!("Store: reducer returned no initial state");
            return Err(StoreError::MissingInitialState);
        };

        let (state, _) = watch::channel(Arc::new(initial));
        let (tx, pending) = mpsc::unbounded_channel();
        log::debug!("Store created with {} middleware", middleware.len());

        Ok(Self {
            core: Core {
                reducer: Box::new(reducer),
                state,
                subscribers: Subscribers::default(),
                reducer_calls: AtomicU64::new(0),
            },
            middleware,
            dispatcher: Dispatcher::new(tx),
            pending,
        })
    }

    /// Append middleware to the chain
    ///
    /// Middleware runs in the order it was added. Add it before the first dispatch.
    pub fn add_middleware<M: Middleware<S, A> + 'static>(&mut self, middleware: M) {
        self.middleware.push(Box::new(middleware));
    }

    /// Current state snapshot
    pub fn state(&self) -> Arc<S> {
        Arc::clone(&self.core.state.borrow())
    }

    /// A handle that reads the latest state without borrowing the store
    pub fn reader(&self) -> StateReader<S> {
        StateReader::new(self.core.state.subscribe())
    }

    /// A handle that queues items for this store
    pub fn dispatcher(&self) -> Dispatcher<S, A> {
        self.dispatcher.clone()
    }

    /// Register a listener that runs after every committed transition
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.core.subscribers.subscribe(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.core.subscribers.len()
    }

    /// Number of reducer invocations committed so far
    pub fn reducer_calls(&self) -> u64 {
        self.core.reducer_calls.load(Ordering::Relaxed)
    }

    /// Process an item through the middleware chain and reducer
    ///
    /// Items queued by middleware or deferred actions during this cycle are
    /// processed afterwards, each as a separate cycle, before this returns.
    /// The returned result belongs to `item`; queued items are drained even
    /// when `item` fails, and their own failures are logged.
    pub fn dispatch(&mut self, item: impl Into<Dispatchable<S, A>>) -> Result<Outcome<A>> {
        let outcome = self.run_cycle(item.into());
        self.drain_pending();
        outcome
    }

    /// Process everything queued so far without waiting
    ///
    /// Each item is an independent cycle: a failing item is logged and the
    /// rest are still processed. Returns how many items were processed.
    pub fn drain_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(item) = self.pending.try_recv() {
            let kind = item.kind();
            if let Err(e) = self.run_cycle(item) {
                log::error!("Store: queued {} failed: {}", kind, e);
            }
            processed += 1;
        }
        processed
    }

    /// Wait for the next queued item (e.g. from a timer) and process it
    pub async fn process_next(&mut self) -> Result<Outcome<A>> {
        // The store owns a sender, so the channel never closes while we wait
        let Some(item) = self.pending.recv().await else {
            return Ok(Outcome::Dropped);
        };
        let outcome = self.run_cycle(item);
        self.drain_pending();
        outcome
    }

    fn run_cycle(&mut self, item: Dispatchable<S, A>) -> Result<Outcome<A>> {
        log::trace!("Store: dispatching {}", item.kind());
        let ctx = Context::new(&self.core.state, &self.dispatcher);
        let mut next = Next::new(&mut self.middleware, &self.core, &ctx);
        next.run(item)
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.core.state.borrow())
            .field("middleware", &self.middleware.len())
            .field("subscribers", &self.core.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Thunk;
    use crate::middleware::logging::LoggingMiddleware;
    use crate::middleware::thunk::ThunkMiddleware;
    use crate::reducer::reducer_fn;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum CounterAction {
        Increase,
        Decrease,
        Unknown,
    }

    impl Action for CounterAction {
        fn kind(&self) -> &'static str {
            match self {
                Self::Increase => "counter/INCREASE",
                Self::Decrease => "counter/DECREASE",
                Self::Unknown => "counter/UNKNOWN",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Counter {
        number: i64,
    }

    fn reduce(state: &Arc<Counter>, action: &CounterAction) -> Arc<Counter> {
        match action {
            CounterAction::Increase => Arc::new(Counter {
                number: state.number + 1,
            }),
            CounterAction::Decrease => Arc::new(Counter {
                number: state.number - 1,
            }),
            CounterAction::Unknown => Arc::clone(state),
        }
    }

    fn counter_store() -> Store<Counter, CounterAction> {
        Store::new(reducer_fn(|| Some(Counter { number: 0 }), reduce)).unwrap()
    }

    #[test]
    fn test_store_initial_state_comes_from_reducer() {
        let store = counter_store();
        assert_eq!(*store.state(), Counter { number: 0 });
        assert_eq!(store.reducer_calls(), 0);
    }

    #[test]
    fn test_store_rejects_missing_initial_state() {
        let result: Result<Store<Counter, CounterAction>> =
            Store::new(reducer_fn(|| None, reduce));
        assert!(matches!(result, Err(StoreError::MissingInitialState)));
    }

    #[test]
    fn test_store_dispatch_sequence() {
        let mut store = counter_store();
        store.dispatch(CounterAction::Increase).unwrap();
        store.dispatch(CounterAction::Increase).unwrap();
        store.dispatch(CounterAction::Decrease).unwrap();

        assert_eq!(store.state().number, 1);
        assert_eq!(store.reducer_calls(), 3);
    }

    #[test]
    fn test_final_state_is_fold_of_reducer() {
        let actions = [
            CounterAction::Increase,
            CounterAction::Unknown,
            CounterAction::Decrease,
            CounterAction::Increase,
            CounterAction::Increase,
        ];
        let mut store = counter_store();
        let mut expected = Arc::new(Counter { number: 0 });
        for action in &actions {
            store.dispatch(action.clone()).unwrap();
            expected = reduce(&expected, action);
        }
        assert_eq!(*store.state(), *expected);
    }

    #[test]
    fn test_unknown_action_keeps_state_reference() {
        let mut store = counter_store();
        let before = store.state();

        let outcome = store.dispatch(CounterAction::Unknown).unwrap();

        assert_eq!(outcome, Outcome::Reduced(CounterAction::Unknown));
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn test_dispatch_returns_original_action() {
        let mut store = counter_store();
        let outcome = store.dispatch(CounterAction::Increase).unwrap();
        assert_eq!(outcome.action(), Some(&CounterAction::Increase));
    }

    #[test]
    fn test_subscribers_fire_once_per_dispatch_in_order() {
        let mut store = counter_store();
        let calls = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let calls = Arc::clone(&calls);
            store.subscribe(move || calls.lock().push("first"))
        };
        let _second = {
            let calls = Arc::clone(&calls);
            store.subscribe(move || calls.lock().push("second"))
        };

        store.dispatch(CounterAction::Increase).unwrap();
        assert_eq!(*calls.lock(), vec!["first", "second"]);

        assert!(first.unsubscribe());
        store.dispatch(CounterAction::Increase).unwrap();
        assert_eq!(*calls.lock(), vec!["first", "second", "second"]);
    }

    #[test]
    fn test_subscriber_sees_committed_state() {
        let mut store = counter_store();
        let reader = store.reader();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let _subscription = {
            let seen = Arc::clone(&seen);
            store.subscribe(move || seen.lock().push(reader.get().number))
        };

        store.dispatch(CounterAction::Increase).unwrap();
        store.dispatch(CounterAction::Increase).unwrap();

        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[test]
    fn test_unsubscribe_during_notification_keeps_current_pass() {
        let mut store = counter_store();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let second_handle: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let _first = {
            let calls = Arc::clone(&calls);
            let second_handle = Arc::clone(&second_handle);
            store.subscribe(move || {
                calls.lock().push("first");
                if let Some(handle) = second_handle.lock().take() {
                    handle.unsubscribe();
                }
            })
        };
        let second = {
            let calls = Arc::clone(&calls);
            store.subscribe(move || calls.lock().push("second"))
        };
        *second_handle.lock() = Some(second);

        store.dispatch(CounterAction::Increase).unwrap();
        assert_eq!(*calls.lock(), vec!["first", "second"]);

        store.dispatch(CounterAction::Increase).unwrap();
        assert_eq!(*calls.lock(), vec!["first", "second", "first"]);
    }

    #[test]
    fn test_thunk_without_middleware_is_an_error() {
        let mut store = counter_store();
        let before = store.state();
        let thunk: Thunk<Counter, CounterAction> = Thunk::new("counter/ASYNC", |_, _| Ok(()));

        let err = store.dispatch(thunk).unwrap_err();

        assert!(matches!(err, StoreError::UnhandledThunk("counter/ASYNC")));
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn test_logging_middleware_does_not_change_outcome() {
        let actions = [
            CounterAction::Increase,
            CounterAction::Unknown,
            CounterAction::Increase,
            CounterAction::Decrease,
        ];

        let mut plain = counter_store();
        let mut logged = counter_store();
        logged.add_middleware(LoggingMiddleware::new());

        for action in actions {
            let a = plain.dispatch(action.clone()).unwrap();
            let b = logged.dispatch(action).unwrap();
            assert_eq!(a, b);
            assert_eq!(*plain.state(), *logged.state());
        }
    }

    #[test]
    fn test_middleware_dispatch_runs_as_followup_cycle() {
        struct EchoDecrease;

        impl Middleware<Counter, CounterAction> for EchoDecrease {
            fn handle(
                &mut self,
                item: Dispatchable<Counter, CounterAction>,
                ctx: &Context<'_, Counter, CounterAction>,
                mut next: Next<'_, Counter, CounterAction>,
            ) -> Result<Outcome<CounterAction>> {
                if matches!(item, Dispatchable::Action(CounterAction::Increase)) {
                    ctx.dispatch(CounterAction::Decrease);
                }
                next.run(item)
            }
        }

        let mut store = counter_store();
        store.add_middleware(EchoDecrease);

        let outcome = store.dispatch(CounterAction::Increase).unwrap();

        assert_eq!(outcome, Outcome::Reduced(CounterAction::Increase));
        assert_eq!(store.state().number, 0);
        assert_eq!(store.reducer_calls(), 2);
    }

    #[test]
    fn test_external_dispatcher_items_are_drained() {
        let mut store = counter_store();
        let dispatcher = store.dispatcher();

        dispatcher.dispatch(CounterAction::Increase);
        dispatcher.dispatch(CounterAction::Increase);
        assert_eq!(store.state().number, 0);

        assert_eq!(store.drain_pending(), 2);
        assert_eq!(store.state().number, 2);
        assert_eq!(store.drain_pending(), 0);
    }

    #[test]
    fn test_failed_thunk_does_not_leak_queued_actions() {
        let mut store = counter_store();
        store.add_middleware(ThunkMiddleware::new());
        let thunk: Thunk<Counter, CounterAction> = Thunk::new("counter/BROKEN", |dispatcher, _| {
            dispatcher.dispatch(CounterAction::Increase);
            anyhow::bail!("boom")
        });

        let err = store.dispatch(thunk).unwrap_err();
        assert!(matches!(err, StoreError::Thunk(_)));
        let after_failure = store.state();

        store.dispatch(CounterAction::Unknown).unwrap();

        assert!(Arc::ptr_eq(&after_failure, &store.state()));
        assert_eq!(store.drain_pending(), 0);
    }

    #[test]
    fn test_failing_followup_keeps_original_outcome() {
        let mut store = counter_store();
        store.add_middleware(ThunkMiddleware::new());
        let thunk: Thunk<Counter, CounterAction> = Thunk::new("counter/FANOUT", |dispatcher, _| {
            let broken: Thunk<Counter, CounterAction> =
                Thunk::new("counter/BROKEN", |_, _| anyhow::bail!("boom"));
            dispatcher.dispatch(CounterAction::Increase);
            dispatcher.dispatch(broken);
            dispatcher.dispatch(CounterAction::Increase);
            Ok(())
        });

        let outcome = store.dispatch(thunk).unwrap();

        assert_eq!(outcome, Outcome::ThunkInvoked);
        assert_eq!(store.state().number, 2);
        assert_eq!(store.drain_pending(), 0);
    }

    #[test]
    fn test_failing_followup_after_plain_action() {
        struct QueueBrokenThunk;

        impl Middleware<Counter, CounterAction> for QueueBrokenThunk {
            fn handle(
                &mut self,
                item: Dispatchable<Counter, CounterAction>,
                ctx: &Context<'_, Counter, CounterAction>,
                mut next: Next<'_, Counter, CounterAction>,
            ) -> Result<Outcome<CounterAction>> {
                if matches!(item, Dispatchable::Action(CounterAction::Increase)) {
                    let broken: Thunk<Counter, CounterAction> =
                        Thunk::new("counter/BROKEN", |_, _| anyhow::bail!("boom"));
                    ctx.dispatch(broken);
                }
                next.run(item)
            }
        }

        let mut store = counter_store();
        store.add_middleware(QueueBrokenThunk);

        // No thunk middleware: the queued thunk fails at the reducer stage
        let outcome = store.dispatch(CounterAction::Increase).unwrap();

        assert_eq!(outcome, Outcome::Reduced(CounterAction::Increase));
        assert_eq!(store.state().number, 1);
        assert_eq!(store.drain_pending(), 0);
    }

    #[tokio::test]
    async fn test_reader_observes_changes() {
        let mut store = counter_store();
        let mut reader = store.reader();

        store.dispatch(CounterAction::Increase).unwrap();

        assert!(reader.changed().await);
        assert_eq!(reader.select(|counter| counter.number), 1);
    }
}
