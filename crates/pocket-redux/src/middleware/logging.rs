//! LoggingMiddleware - traces every dispatch, grouped by action kind
//!
//! For each item it records the previous state, the item itself and the state
//! after the rest of the chain ran. Entries go to the `log` facade and,
//! optionally, into a [`LogJournal`] that views and tests can read back.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use super::{Context, Middleware, Next};
use crate::action::{Action, Dispatchable, Outcome};
use crate::error::Result;

/// One traced dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: &'static str,
    pub prev_state: String,
    pub action: String,
    pub next_state: String,
}

/// Shared, bounded buffer of [`LogEntry`]s
///
/// Oldest entries are dropped once `capacity` is reached.
#[derive(Clone)]
pub struct LogJournal {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogJournal {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    fn record(&self, entry: LogEntry) {
        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Copy of the current entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for LogJournal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogJournal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogJournal")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

/// LoggingMiddleware - logs all items that pass through the store
///
/// Purely observational: it calls `next` exactly once and returns its outcome.
pub struct LoggingMiddleware {
    level: log::Level,
    journal: Option<LogJournal>,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self {
            level: log::Level::Debug,
            journal: None,
        }
    }

    pub fn with_level(mut self, level: log::Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_journal(mut self, journal: LogJournal) -> Self {
        self.journal = Some(journal);
        self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Middleware<S, A> for LoggingMiddleware
where
    S: fmt::Debug + Send + Sync + 'static,
    A: Action,
{
    fn handle(
        &mut self,
        item: Dispatchable<S, A>,
        ctx: &Context<'_, S, A>,
        mut next: Next<'_, S, A>,
    ) -> Result<Outcome<A>> {
        let traced = log::log_enabled!(self.level) || self.journal.is_some();
        if !traced {
            return next.run(item);
        }

        let kind = item.kind();
        let prev_state = format!("{:?}", ctx.get_state());
        let action = format!("{:?}", item);
        log::log!(self.level, "[{}] prev state: {}", kind, prev_state);
        log::log!(self.level, "[{}] action: {}", kind, action);

        let outcome = next.run(item);

        let next_state = format!("{:?}", ctx.get_state());
        log::log!(self.level, "[{}] next state: {}", kind, next_state);

        if let Some(journal) = &self.journal {
            journal.record(LogEntry {
                kind,
                prev_state,
                action,
                next_state,
            });
        }

        outcome
    }
}
