//! Actions and the values `dispatch` accepts
//!
//! Plain actions are closed enums describing a state change. A [`Thunk`] is a
//! deferred action: a procedure that gets the dispatcher and a state reader and
//! decides on its own when (and whether) to dispatch concrete actions.

use std::fmt;

use crate::dispatcher::Dispatcher;
use crate::reader::StateReader;

/// A plain action value
///
/// `kind` is the dispatch key used for log grouping, e.g. `counter/INCREASE`.
pub trait Action: fmt::Debug + Send + 'static {
    fn kind(&self) -> &'static str;
}

type ThunkBody<S, A> =
    Box<dyn FnOnce(&Dispatcher<S, A>, &StateReader<S>) -> anyhow::Result<()> + Send>;

/// Deferred action, executed by [`crate::ThunkMiddleware`] instead of being reduced
pub struct Thunk<S, A> {
    label: &'static str,
    body: ThunkBody<S, A>,
}

impl<S, A> Thunk<S, A> {
    pub fn new<F>(label: &'static str, body: F) -> Self
    where
        F: FnOnce(&Dispatcher<S, A>, &StateReader<S>) -> anyhow::Result<()> + Send + 'static,
    {
        Self {
            label,
            body: Box::new(body),
        }
    }

    /// Name shown in logs in place of an action kind
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn run(self, dispatcher: &Dispatcher<S, A>, reader: &StateReader<S>) -> anyhow::Result<()> {
        (self.body)(dispatcher, reader)
    }
}

impl<S, A> fmt::Debug for Thunk<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thunk")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Anything that can be handed to `dispatch`
pub enum Dispatchable<S, A> {
    Action(A),
    Thunk(Thunk<S, A>),
}

impl<S, A: Action> Dispatchable<S, A> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Action(action) => action.kind(),
            Self::Thunk(thunk) => thunk.label(),
        }
    }
}

impl<S, A> Dispatchable<S, A> {
    pub fn is_thunk(&self) -> bool {
        matches!(self, Self::Thunk(_))
    }
}

impl<S, A: fmt::Debug> fmt::Debug for Dispatchable<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(action) => action.fmt(f),
            Self::Thunk(thunk) => thunk.fmt(f),
        }
    }
}

impl<S, A> From<A> for Dispatchable<S, A> {
    fn from(action: A) -> Self {
        Self::Action(action)
    }
}

impl<S, A> From<Thunk<S, A>> for Dispatchable<S, A> {
    fn from(thunk: Thunk<S, A>) -> Self {
        Self::Thunk(thunk)
    }
}

/// Result of a dispatch, as returned by the outermost middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<A> {
    /// The action reached the reducer and the new state was committed
    Reduced(A),
    /// A deferred action was invoked instead of being reduced
    ThunkInvoked,
    /// A middleware returned without passing the action on
    Dropped,
}

impl<A> Outcome<A> {
    pub fn action(&self) -> Option<&A> {
        match self {
            Self::Reduced(action) => Some(action),
            _ => None,
        }
    }

    pub fn is_reduced(&self) -> bool {
        matches!(self, Self::Reduced(_))
    }
}
