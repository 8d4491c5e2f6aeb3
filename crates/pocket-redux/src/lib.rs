//! A small unidirectional state container
//!
//! ```text
//! dispatch(action) → middleware chain → reducer → new state → subscribers
//! ```
//!
//! - [`Action`]: closed enums describing an intended change; [`Thunk`]s are
//!   deferred actions run by [`ThunkMiddleware`]
//! - [`Reducer`]: pure `(state, action) -> state`, returning the same `Arc`
//!   when nothing changed
//! - [`Store`]: owns the state, runs the chain, notifies subscribers
//! - [`Middleware`]: interceptors wrapped around the reducer, first added is outermost
//! - [`SliceCombiner`]: builds root reducers out of slice reducers

pub mod action;
pub mod bindings;
pub mod combine;
pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod reader;
pub mod reducer;
pub mod store;
mod subscribers;

pub use action::{Action, Dispatchable, Outcome, Thunk};
pub use bindings::{bind, bind_with};
pub use combine::{SliceAction, SliceCombiner};
pub use dispatcher::Dispatcher;
pub use error::{Result, StoreError};
pub use middleware::logging::{LogEntry, LogJournal, LoggingMiddleware};
pub use middleware::thunk::ThunkMiddleware;
pub use middleware::{Context, Middleware, Next};
pub use reader::StateReader;
pub use reducer::{reducer_fn, FnReducer, Reducer};
pub use store::Store;
pub use subscribers::Subscription;
