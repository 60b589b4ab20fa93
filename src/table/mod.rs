//! Declarative transition tables.
//!
//! A table maps `state -> event -> transition`. It is pure data: built once
//! (usually through [`TableBuilder`](crate::builder::TableBuilder)), wrapped
//! in an `Arc`, and shared read-only by every machine of that workflow.

mod transition;

pub use transition::Transition;

use crate::core::{Event, State};
use std::collections::HashMap;

/// Immutable `state -> event -> transition` map.
#[derive(Clone, Debug)]
pub struct TransitionTable<S: State, E: Event> {
    rows: HashMap<S, HashMap<E, Transition<S>>>,
}

impl<S: State, E: Event> TransitionTable<S, E> {
    pub(crate) fn from_rows(rows: HashMap<S, HashMap<E, Transition<S>>>) -> Self {
        Self { rows }
    }

    /// The outgoing transitions of `state`, if the table has a row for it.
    pub fn row(&self, state: &S) -> Option<&HashMap<E, Transition<S>>> {
        self.rows.get(state)
    }

    /// The transition for `(state, event)`, if defined.
    pub fn get(&self, state: &S, event: &E) -> Option<&Transition<S>> {
        self.rows.get(state)?.get(event)
    }

    pub fn contains(&self, state: &S, event: &E) -> bool {
        self.get(state, event).is_some()
    }

    /// Events with a transition out of `state`.
    pub fn events_from<'a>(&'a self, state: &S) -> impl Iterator<Item = &'a E> + 'a {
        self.rows.get(state).into_iter().flat_map(|row| row.keys())
    }

    /// Every state the table mentions, as a source or a target.
    pub fn states(&self) -> Vec<&S> {
        let mut states: Vec<&S> = Vec::new();
        for (from, row) in &self.rows {
            if !states.contains(&from) {
                states.push(from);
            }
            for transition in row.values() {
                let to = transition.target();
                if !states.contains(&to) {
                    states.push(to);
                }
            }
        }
        states
    }

    /// Number of `(state, event)` pairs defined.
    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Loading,
        Done,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Loading => "Loading",
                Self::Done => "Done",
            }
        }
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Load,
        Finish,
    }

    impl Event for TestEvent {
        fn name(&self) -> &str {
            match self {
                Self::Load => "Load",
                Self::Finish => "Finish",
            }
        }
    }

    fn table() -> TransitionTable<TestState, TestEvent> {
        TableBuilder::new()
            .on(TestState::Idle, TestEvent::Load, TestState::Loading)
            .on(TestState::Loading, TestEvent::Finish, TestState::Done)
            .build()
            .unwrap()
    }

    #[test]
    fn lookup_finds_defined_pairs() {
        let table = table();

        assert_eq!(
            table.get(&TestState::Idle, &TestEvent::Load).map(Transition::target),
            Some(&TestState::Loading)
        );
        assert!(table.contains(&TestState::Loading, &TestEvent::Finish));
        assert!(!table.contains(&TestState::Idle, &TestEvent::Finish));
        assert!(table.row(&TestState::Done).is_none());
    }

    #[test]
    fn states_include_targets_without_rows() {
        let table = table();
        let states = table.states();

        assert_eq!(states.len(), 3);
        assert!(states.contains(&&TestState::Done));
    }

    #[test]
    fn events_from_lists_outgoing_events() {
        let table = table();

        let events: Vec<&TestEvent> = table.events_from(&TestState::Idle).collect();
        assert_eq!(events, vec![&TestEvent::Load]);
        assert_eq!(table.events_from(&TestState::Done).count(), 0);
    }

    #[test]
    fn len_counts_pairs() {
        assert_eq!(table().len(), 2);
        assert!(!table().is_empty());
    }
}
