//! Slice combination for root reducers
//!
//! A root reducer owns a state made of independent slices, each held behind its
//! own `Arc`. Every sub-reducer runs on every action and sees only its slice plus
//! the full action. [`SliceCombiner`] tracks whether any slice reference changed
//! and hands back the previous root when none did.
//!
//! ```
//! use std::sync::Arc;
//! use pocket_redux::SliceCombiner;
//!
//! struct Root {
//!     clicks: Arc<u32>,
//!     label: Arc<String>,
//! }
//!
//! fn reduce(state: &Arc<Root>, click: &bool) -> Arc<Root> {
//!     let mut combiner = SliceCombiner::new(state);
//!     let clicks = combiner.slice(&state.clicks, |clicks| {
//!         if *click { Arc::new(**clicks + 1) } else { Arc::clone(clicks) }
//!     });
//!     let label = combiner.slice(&state.label, Arc::clone);
//!     combiner.finish(|| Root { clicks, label })
//! }
//!
//! let root = Arc::new(Root { clicks: Arc::new(0), label: Arc::new("x".into()) });
//! assert!(Arc::ptr_eq(&root, &reduce(&root, &false)));
//! assert_eq!(*reduce(&root, &true).clicks, 1);
//! ```

use std::sync::Arc;

/// Borrow the part of a (root) action that a slice reducer understands
///
/// Every type is a slice action of itself, so slice reducers written against
/// `A: SliceAction<MyAction>` work both standalone and under a root reducer.
pub trait SliceAction<T> {
    fn slice_action(&self) -> Option<&T>;
}

impl<T> SliceAction<T> for T {
    fn slice_action(&self) -> Option<&T> {
        Some(self)
    }
}

pub struct SliceCombiner<'a, S> {
    previous: &'a Arc<S>,
    changed: bool,
}

impl<'a, S> SliceCombiner<'a, S> {
    pub fn new(previous: &'a Arc<S>) -> Self {
        Self {
            previous,
            changed: false,
        }
    }

    /// Run one sub-reducer against its slice and remember whether it produced a new value
    pub fn slice<T, F>(&mut self, slice: &Arc<T>, reduce: F) -> Arc<T>
    where
        F: FnOnce(&Arc<T>) -> Arc<T>,
    {
        let next = reduce(slice);
        if !Arc::ptr_eq(slice, &next) {
            self.changed = true;
        }
        next
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Assemble the new root, or return the previous one if no slice changed
    pub fn finish<F>(self, build: F) -> Arc<S>
    where
        F: FnOnce() -> S,
    {
        if self.changed {
            Arc::new(build())
        } else {
            Arc::clone(self.previous)
        }
    }
}
