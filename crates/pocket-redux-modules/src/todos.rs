//! Todo list slice
//!
//! Identifiers are allocated by the reducer from `next_id`, which lives in the
//! state, so replaying the same actions always yields the same ids. Entries
//! are shared between snapshots; only the entries an action touches are
//! replaced.

use pocket_redux::{Action, Reducer, SliceAction};
use std::sync::Arc;
use strum::IntoStaticStr;

#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum TodoAction {
    /// Input field changed
    #[strum(serialize = "todo/CHANGE_INPUT")]
    ChangeInput(String),
    /// Append a new, not yet done entry
    #[strum(serialize = "todo/INSERT")]
    Insert(String),
    /// Flip `done` of the entry with this id
    #[strum(serialize = "todo/TOGGLE")]
    Toggle(u64),
    #[strum(serialize = "todo/REMOVE")]
    Remove(u64),
}

impl Action for TodoAction {
    fn kind(&self) -> &'static str {
        self.into()
    }
}

pub fn change_input(input: impl Into<String>) -> TodoAction {
    TodoAction::ChangeInput(input.into())
}

pub fn insert(text: impl Into<String>) -> TodoAction {
    TodoAction::Insert(text.into())
}

pub fn toggle(id: u64) -> TodoAction {
    TodoAction::Toggle(id)
}

pub fn remove(id: u64) -> TodoAction {
    TodoAction::Remove(id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

impl Todo {
    pub fn new(id: u64, text: impl Into<String>, done: bool) -> Self {
        Self {
            id,
            text: text.into(),
            done,
        }
    }

    pub fn toggled(&self) -> Self {
        Self {
            done: !self.done,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodosState {
    pub input: String,
    pub todos: Vec<Arc<Todo>>,
    /// Id handed to the next inserted entry
    pub next_id: u64,
}

impl TodosState {
    /// State holding `todos`, with `next_id` past the highest existing id
    pub fn new(todos: Vec<Todo>) -> Self {
        let next_id = todos.iter().map(|todo| todo.id).max().unwrap_or(0) + 1;
        Self {
            input: String::new(),
            todos: todos.into_iter().map(Arc::new).collect(),
            next_id,
        }
    }

    pub fn find(&self, id: u64) -> Option<&Arc<Todo>> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn ids(&self) -> Vec<u64> {
        self.todos.iter().map(|todo| todo.id).collect()
    }

    pub fn with_input(&self, input: String) -> Self {
        Self {
            input,
            ..self.clone()
        }
    }

    pub fn with_todos(&self, todos: Vec<Arc<Todo>>) -> Self {
        Self {
            todos,
            ..self.clone()
        }
    }

    fn with_inserted(&self, text: &str) -> Self {
        let mut todos = self.todos.clone();
        todos.push(Arc::new(Todo::new(self.next_id, text, false)));
        Self {
            input: self.input.clone(),
            todos,
            next_id: self.next_id + 1,
        }
    }
}

impl Default for TodosState {
    fn default() -> Self {
        Self::new(vec![
            Todo::new(1, "test content01", true),
            Todo::new(2, "test content02", false),
        ])
    }
}

pub fn reduce<A>(state: &Arc<TodosState>, action: &A) -> Arc<TodosState>
where
    A: SliceAction<TodoAction>,
{
    let Some(action) = action.slice_action() else {
        return Arc::clone(state);
    };

    match action {
        TodoAction::ChangeInput(input) if *input == state.input => Arc::clone(state),
        TodoAction::ChangeInput(input) => Arc::new(state.with_input(input.clone())),
        TodoAction::Insert(text) => Arc::new(state.with_inserted(text)),
        TodoAction::Toggle(id) => {
            if state.find(*id).is_none() {
                log::debug!("todo/TOGGLE: no entry with id {}", id);
                return Arc::clone(state);
            }
            let todos = state
                .todos
                .iter()
                .map(|todo| {
                    if todo.id == *id {
                        Arc::new(todo.toggled())
                    } else {
                        Arc::clone(todo)
                    }
                })
                .collect();
            Arc::new(state.with_todos(todos))
        }
        TodoAction::Remove(id) => {
            if state.find(*id).is_none() {
                log::debug!("todo/REMOVE: no entry with id {}", id);
                return Arc::clone(state);
            }
            let todos = state
                .todos
                .iter()
                .filter(|todo| todo.id != *id)
                .cloned()
                .collect();
            Arc::new(state.with_todos(todos))
        }
    }
}

/// Standalone reducer for a store holding only the todo list
#[derive(Debug, Default)]
pub struct TodosReducer;

impl Reducer<TodosState, TodoAction> for TodosReducer {
    fn initial_state(&self) -> Option<TodosState> {
        Some(TodosState::default())
    }

    fn reduce(&self, state: &Arc<TodosState>, action: &TodoAction) -> Arc<TodosState> {
        reduce(state, action)
    }
}
