//! Errors surfaced by the store

use thiserror::Error;

/// Errors that can occur while building a store or dispatching into it
#[derive(Error, Debug)]
pub enum StoreError {
    /// The reducer did not provide an initial state
    #[error("reducer produced no initial state")]
    MissingInitialState,

    /// A deferred action reached the reducer stage
    #[error("deferred action `{0}` reached the reducer; is ThunkMiddleware installed?")]
    UnhandledThunk(&'static str),

    /// A delayed dispatch was requested outside of a tokio runtime
    #[error("no tokio runtime available to schedule `{0}`")]
    NoRuntime(&'static str),

    /// The body of a deferred action failed while it was being invoked
    #[error("deferred action failed: {0:#}")]
    Thunk(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
