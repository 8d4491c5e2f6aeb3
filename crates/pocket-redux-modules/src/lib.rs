//! State modules for the pocket-redux demos
//!
//! Each module bundles its action enum, action creators, state type and
//! reducer:
//! - `counter`: a number moved by one
//! - `todos`: a todo list with an input field
//! - `root`: counter + todos combined into one store
//! - `vanilla`: toggle + counter slices driven by payload-carrying actions
//! - `async_counter`: plain number state with deferred increase/decrease

pub mod async_counter;
pub mod counter;
pub mod root;
pub mod todos;
pub mod vanilla;
