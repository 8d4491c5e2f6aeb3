//! Demo application: three independent stores behind one terminal UI

use anyhow::{Context, Result};
use pocket_redux::{LogJournal, LoggingMiddleware, Store, Subscription};
use pocket_redux_config::AppConfig;
use pocket_redux_modules::async_counter::{self, AsyncCounterStore};
use pocket_redux_modules::root::{AppAction, RootReducer, RootState};
use pocket_redux_modules::vanilla::{self, VanillaAction, VanillaReducer, VanillaState};
use pocket_redux_modules::{counter, todos};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::keymap::Command;

pub struct App {
    pub config: AppConfig,
    pub vanilla: Store<VanillaState, VanillaAction>,
    pub root: Store<RootState, AppAction>,
    pub async_counter: AsyncCounterStore,
    pub journal: LogJournal,
    /// Index of the highlighted todo (view state, not part of any store)
    pub todo_cursor: usize,
    pub running: bool,
    dirty: Arc<AtomicBool>,
    subscriptions: Vec<Subscription>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let journal = LogJournal::new();

        let mut vanilla = Store::new(VanillaReducer).context("Failed to create vanilla store")?;
        vanilla.add_middleware(LoggingMiddleware::new().with_journal(journal.clone()));

        let mut root = Store::new(RootReducer).context("Failed to create root store")?;
        root.add_middleware(LoggingMiddleware::new().with_journal(journal.clone()));

        let async_counter = async_counter::configure_store(Some(journal.clone()))
            .context("Failed to create async counter store")?;

        let dirty = Arc::new(AtomicBool::new(true));
        let subscriptions = vec![
            vanilla.subscribe(mark_dirty(&dirty)),
            root.subscribe(mark_dirty(&dirty)),
            async_counter.subscribe(mark_dirty(&dirty)),
        ];

        Ok(Self {
            config,
            vanilla,
            root,
            async_counter,
            journal,
            todo_cursor: 0,
            running: true,
            dirty,
            subscriptions,
        })
    }

    /// Whether a redraw is needed; resets the flag
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::Relaxed)
    }

    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Relaxed);
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        log::debug!("Command: {:?}", command);
        let step = self.config.increase_step;

        match command {
            Command::Quit => {
                self.running = false;
                for subscription in self.subscriptions.drain(..) {
                    subscription.unsubscribe();
                }
            }
            Command::ToggleSwitch => {
                self.vanilla.dispatch(vanilla::toggle_switch())?;
            }
            Command::VanillaIncrease => {
                self.vanilla.dispatch(vanilla::increase(step))?;
            }
            Command::VanillaDecrease => {
                self.vanilla.dispatch(vanilla::decrease(step))?;
            }
            Command::CounterIncrease => {
                self.root.dispatch(AppAction::from(counter::increase()))?;
            }
            Command::CounterDecrease => {
                self.root.dispatch(AppAction::from(counter::decrease()))?;
            }
            Command::TodoInsert => {
                let next_id = self.root.state().todos.next_id;
                self.root
                    .dispatch(AppAction::from(todos::insert(format!("todo #{}", next_id))))?;
                self.todo_cursor = self.root.state().todos.todos.len().saturating_sub(1);
            }
            Command::TodoToggle => {
                if let Some(id) = self.selected_todo_id() {
                    self.root.dispatch(AppAction::from(todos::toggle(id)))?;
                }
            }
            Command::TodoRemove => {
                if let Some(id) = self.selected_todo_id() {
                    self.root.dispatch(AppAction::from(todos::remove(id)))?;
                    let len = self.root.state().todos.todos.len();
                    self.todo_cursor = self.todo_cursor.min(len.saturating_sub(1));
                }
            }
            Command::TodoNext => {
                let len = self.root.state().todos.todos.len();
                if self.todo_cursor + 1 < len {
                    self.todo_cursor += 1;
                    self.mark_dirty();
                }
            }
            Command::TodoPrevious => {
                if self.todo_cursor > 0 {
                    self.todo_cursor -= 1;
                    self.mark_dirty();
                }
            }
            Command::AsyncIncrease => {
                let delay = self.config.async_delay();
                self.async_counter
                    .dispatch(async_counter::increase_async(delay))?;
            }
            Command::AsyncDecrease => {
                let delay = self.config.async_delay();
                self.async_counter
                    .dispatch(async_counter::decrease_async(delay))?;
            }
            Command::ClearLog => {
                self.journal.clear();
                self.mark_dirty();
            }
        }

        Ok(())
    }

    /// Process actions delivered by timers since the last tick
    pub fn tick(&mut self) {
        self.vanilla.drain_pending();
        self.root.drain_pending();
        let processed = self.async_counter.drain_pending();
        if processed > 0 {
            log::debug!("Applied {} deferred action(s)", processed);
        }
    }

    fn selected_todo_id(&self) -> Option<u64> {
        self.root
            .state()
            .todos
            .todos
            .get(self.todo_cursor)
            .map(|todo| todo.id)
    }
}

fn mark_dirty(dirty: &Arc<AtomicBool>) -> impl Fn() + Send + Sync + 'static {
    let dirty = Arc::clone(dirty);
    move || dirty.store(true, Ordering::Relaxed)
}
