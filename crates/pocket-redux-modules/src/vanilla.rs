//! Toggle switch and counter, each in its own slice
//!
//! `increase` and `decrease` both carry the amount to move the counter by.

use pocket_redux::{Action, Reducer, SliceCombiner};
use std::sync::Arc;
use strum::IntoStaticStr;

#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum VanillaAction {
    #[strum(serialize = "TOGGLE_SWITCH")]
    ToggleSwitch,
    #[strum(serialize = "INCREASE")]
    Increase(i64),
    #[strum(serialize = "DECREASE")]
    Decrease(i64),
}

impl Action for VanillaAction {
    fn kind(&self) -> &'static str {
        self.into()
    }
}

pub fn toggle_switch() -> VanillaAction {
    VanillaAction::ToggleSwitch
}

pub fn increase(amount: i64) -> VanillaAction {
    VanillaAction::Increase(amount)
}

pub fn decrease(amount: i64) -> VanillaAction {
    VanillaAction::Decrease(amount)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VanillaState {
    pub toggle: Arc<bool>,
    pub counter: Arc<i64>,
}

impl VanillaState {
    pub fn new(toggle: bool, counter: i64) -> Self {
        Self {
            toggle: Arc::new(toggle),
            counter: Arc::new(counter),
        }
    }
}

fn reduce_toggle(state: &Arc<bool>, action: &VanillaAction) -> Arc<bool> {
    match action {
        VanillaAction::ToggleSwitch => Arc::new(!**state),
        _ => Arc::clone(state),
    }
}

fn reduce_counter(state: &Arc<i64>, action: &VanillaAction) -> Arc<i64> {
    match action {
        VanillaAction::Increase(0) | VanillaAction::Decrease(0) => Arc::clone(state),
        // Out-of-range results leave the counter where it is
        VanillaAction::Increase(amount) => state
            .checked_add(*amount)
            .map_or_else(|| Arc::clone(state), Arc::new),
        VanillaAction::Decrease(amount) => state
            .checked_sub(*amount)
            .map_or_else(|| Arc::clone(state), Arc::new),
        VanillaAction::ToggleSwitch => Arc::clone(state),
    }
}

pub fn reduce(state: &Arc<VanillaState>, action: &VanillaAction) -> Arc<VanillaState> {
    let mut combiner = SliceCombiner::new(state);
    let toggle = combiner.slice(&state.toggle, |slice| reduce_toggle(slice, action));
    let counter = combiner.slice(&state.counter, |slice| reduce_counter(slice, action));
    combiner.finish(|| VanillaState { toggle, counter })
}

#[derive(Debug, Default)]
pub struct VanillaReducer;

impl Reducer<VanillaState, VanillaAction> for VanillaReducer {
    fn initial_state(&self) -> Option<VanillaState> {
        Some(VanillaState::new(false, 0))
    }

    fn reduce(&self, state: &Arc<VanillaState>, action: &VanillaAction) -> Arc<VanillaState> {
        reduce(state, action)
    }
}
