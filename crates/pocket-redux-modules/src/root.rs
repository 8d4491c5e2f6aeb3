//! Root state combining the counter and todo slices

use pocket_redux::{Action, Reducer, SliceAction, SliceCombiner};
use std::sync::Arc;

use crate::counter::{self, CounterAction, CounterState};
use crate::todos::{self, TodoAction, TodosState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Counter(CounterAction),
    Todos(TodoAction),
}

impl Action for AppAction {
    fn kind(&self) -> &'static str {
        match self {
            Self::Counter(action) => action.kind(),
            Self::Todos(action) => action.kind(),
        }
    }
}

impl From<CounterAction> for AppAction {
    fn from(action: CounterAction) -> Self {
        Self::Counter(action)
    }
}

impl From<TodoAction> for AppAction {
    fn from(action: TodoAction) -> Self {
        Self::Todos(action)
    }
}

impl SliceAction<CounterAction> for AppAction {
    fn slice_action(&self) -> Option<&CounterAction> {
        match self {
            Self::Counter(action) => Some(action),
            _ => None,
        }
    }
}

impl SliceAction<TodoAction> for AppAction {
    fn slice_action(&self) -> Option<&TodoAction> {
        match self {
            Self::Todos(action) => Some(action),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootState {
    pub counter: Arc<CounterState>,
    pub todos: Arc<TodosState>,
}

/// Root reducer - runs every slice reducer on every action
pub fn reduce(state: &Arc<RootState>, action: &AppAction) -> Arc<RootState> {
    let mut combiner = SliceCombiner::new(state);
    let counter = combiner.slice(&state.counter, |slice| counter::reduce(slice, action));
    let todos = combiner.slice(&state.todos, |slice| todos::reduce(slice, action));
    combiner.finish(|| RootState { counter, todos })
}

#[derive(Debug, Default)]
pub struct RootReducer;

impl Reducer<RootState, AppAction> for RootReducer {
    fn initial_state(&self) -> Option<RootState> {
        Some(RootState::default())
    }

    fn reduce(&self, state: &Arc<RootState>, action: &AppAction) -> Arc<RootState> {
        reduce(state, action)
    }
}
