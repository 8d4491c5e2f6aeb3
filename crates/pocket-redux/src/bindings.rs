//! Helpers for view code: bound action creators
//!
//! Selecting state is done with [`crate::StateReader::select`]; this module
//! covers the dispatch side.

use crate::action::{Action, Dispatchable};
use crate::dispatcher::Dispatcher;

/// Bind an action creator to a dispatcher
///
/// Every call of the returned callback builds a fresh item and queues it.
pub fn bind<S, A, T, F>(dispatcher: &Dispatcher<S, A>, creator: F) -> impl Fn() + Send + Sync + 'static
where
    S: Send + Sync + 'static,
    A: Action,
    T: Into<Dispatchable<S, A>>,
    F: Fn() -> T + Send + Sync + 'static,
{
    let dispatcher = dispatcher.clone();
    move || dispatcher.dispatch(creator())
}

/// Like [`bind`], for creators that take a payload
pub fn bind_with<S, A, P, T, F>(
    dispatcher: &Dispatcher<S, A>,
    creator: F,
) -> impl Fn(P) + Send + Sync + 'static
where
    S: Send + Sync + 'static,
    A: Action,
    T: Into<Dispatchable<S, A>>,
    F: Fn(P) -> T + Send + Sync + 'static,
{
    let dispatcher = dispatcher.clone();
    move |payload| dispatcher.dispatch(creator(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::reducer_fn;
    use crate::store::Store;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq)]
    enum Adjust {
        By(i32),
        Reset,
    }

    impl Action for Adjust {
        fn kind(&self) -> &'static str {
            match self {
                Adjust::By(_) => "ADJUST",
                Adjust::Reset => "RESET",
            }
        }
    }

    #[test]
    fn test_bound_creators_queue_actions() {
        let mut store = Store::new(reducer_fn(
            || Some(0i32),
            |state: &Arc<i32>, action: &Adjust| match action {
                Adjust::By(n) => Arc::new(**state + n),
                Adjust::Reset => Arc::new(0),
            },
        ))
        .unwrap();

        let adjust = bind_with(&store.dispatcher(), Adjust::By);
        let reset = bind(&store.dispatcher(), || Adjust::Reset);

        adjust(4);
        adjust(-1);
        store.drain_pending();
        assert_eq!(*store.state(), 3);

        reset();
        store.drain_pending();
        assert_eq!(store.reader().select(|n| *n), 0);
    }
}
