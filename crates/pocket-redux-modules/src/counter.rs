//! Counter slice

use pocket_redux::{Action, Reducer, SliceAction};
use std::sync::Arc;
use strum::IntoStaticStr;

#[derive(Debug, Clone, PartialEq, Eq, IntoStaticStr)]
pub enum CounterAction {
    #[strum(serialize = "counter/INCREASE")]
    Increase,
    #[strum(serialize = "counter/DECREASE")]
    Decrease,
}

impl Action for CounterAction {
    fn kind(&self) -> &'static str {
        self.into()
    }
}

pub fn increase() -> CounterAction {
    CounterAction::Increase
}

pub fn decrease() -> CounterAction {
    CounterAction::Decrease
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterState {
    pub number: i64,
}

impl CounterState {
    pub fn with_number(&self, number: i64) -> Self {
        Self { number }
    }
}

pub fn reduce<A>(state: &Arc<CounterState>, action: &A) -> Arc<CounterState>
where
    A: SliceAction<CounterAction>,
{
    match action.slice_action() {
        Some(CounterAction::Increase) => match state.number.checked_add(1) {
            Some(number) => Arc::new(state.with_number(number)),
            None => Arc::clone(state),
        },
        Some(CounterAction::Decrease) => match state.number.checked_sub(1) {
            Some(number) => Arc::new(state.with_number(number)),
            None => Arc::clone(state),
        },
        None => Arc::clone(state),
    }
}

/// Standalone reducer for a store holding only the counter
#[derive(Debug, Default)]
pub struct CounterReducer;

impl Reducer<CounterState, CounterAction> for CounterReducer {
    fn initial_state(&self) -> Option<CounterState> {
        Some(CounterState::default())
    }

    fn reduce(&self, state: &Arc<CounterState>, action: &CounterAction) -> Arc<CounterState> {
        reduce(state, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_redux::Store;

    #[test]
    fn test_action_kinds() {
        assert_eq!(increase().kind(), "counter/INCREASE");
        assert_eq!(decrease().kind(), "counter/DECREASE");
    }

    #[test]
    fn test_increase_twice_decrease_once() {
        let mut store = Store::new(CounterReducer).unwrap();
        assert_eq!(store.state().number, 0);

        store.dispatch(increase()).unwrap();
        store.dispatch(increase()).unwrap();
        store.dispatch(decrease()).unwrap();

        assert_eq!(*store.state(), CounterState { number: 1 });
    }

    #[test]
    fn test_reduce_does_not_touch_previous_state() {
        let state = Arc::new(CounterState { number: 7 });
        let next = reduce(&state, &increase());
        assert_eq!(state.number, 7);
        assert_eq!(next.number, 8);
    }

    #[test]
    fn test_counter_stops_at_bounds() {
        let max = Arc::new(CounterState { number: i64::MAX });
        assert!(Arc::ptr_eq(&max, &reduce(&max, &increase())));
        assert_eq!(reduce(&max, &decrease()).number, i64::MAX - 1);

        let min = Arc::new(CounterState { number: i64::MIN });
        assert!(Arc::ptr_eq(&min, &reduce(&min, &decrease())));
    }
}
