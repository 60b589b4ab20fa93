//! Builder for constructing transition tables.

use crate::builder::error::BuildError;
use crate::builder::transition::{TransitionBuilder, TransitionRule};
use crate::core::{Event, State};
use crate::table::{Transition, TransitionTable};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Builder for assembling a [`TransitionTable`] rule by rule.
///
/// # Example
///
/// ```
/// use flowstate::builder::{TableBuilder, TransitionBuilder};
/// use flowstate::{event_enum, state_enum};
///
/// state_enum! {
///     enum Door { Closed, Open, Locked }
/// }
///
/// event_enum! {
///     enum Action { Open, Close, Lock }
/// }
///
/// let table = TableBuilder::new()
///     .on(Door::Closed, Action::Open, Door::Open)
///     .on(Door::Open, Action::Close, Door::Closed)
///     .transition(
///         TransitionBuilder::new()
///             .from(Door::Closed)
///             .on(Action::Lock)
///             .to(Door::Locked)
///             .when(|| true),
///     )
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 3);
/// ```
pub struct TableBuilder<S: State, E: Event> {
    rules: Vec<TransitionRule<S, E>>,
}

impl<S: State, E: Event> TableBuilder<S, E> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add an unconditional `from --event--> to` rule.
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.rules.push(TransitionRule {
            from,
            event,
            transition: Transition::Direct(to),
        });
        self
    }

    /// Add the same `event --> to` rule from several source states.
    pub fn on_each<I>(mut self, sources: I, event: E, to: S) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        for from in sources {
            self = self.on(from, event.clone(), to.clone());
        }
        self
    }

    /// Add a rule using a transition builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, E>) -> Result<Self, BuildError> {
        let rule = builder.build()?;
        self.rules.push(rule);
        Ok(self)
    }

    /// Add a pre-built rule.
    pub fn rule(mut self, rule: TransitionRule<S, E>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Build the table.
    /// Fails if no rules were added or a `(state, event)` pair repeats.
    pub fn build(self) -> Result<TransitionTable<S, E>, BuildError> {
        if self.rules.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut rows: HashMap<S, HashMap<E, Transition<S>>> = HashMap::new();
        for rule in self.rules {
            let row = rows.entry(rule.from.clone()).or_default();
            match row.entry(rule.event) {
                Entry::Occupied(occupied) => {
                    return Err(BuildError::DuplicateTransition {
                        state: rule.from.name().to_string(),
                        event: occupied.key().name().to_string(),
                    });
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(rule.transition);
                }
            }
        }

        Ok(TransitionTable::from_rows(rows))
    }
}

impl<S: State, E: Event> Default for TableBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event_enum, state_enum};

    state_enum! {
        enum TestState {
            Idle,
            Loading,
            Success,
            Error,
        }
        error: [Error]
    }

    event_enum! {
        enum TestEvent {
            Load,
            Succeed,
            Fail,
        }
    }

    #[test]
    fn empty_builder_is_rejected() {
        let result = TableBuilder::<TestState, TestEvent>::new().build();
        assert!(matches!(result, Err(BuildError::NoTransitions)));
    }

    #[test]
    fn duplicate_pair_is_rejected() {
        let result = TableBuilder::new()
            .on(TestState::Idle, TestEvent::Load, TestState::Loading)
            .on(TestState::Idle, TestEvent::Load, TestState::Error)
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::DuplicateTransition {
                state: "Idle".to_string(),
                event: "Load".to_string(),
            })
        );
    }

    #[test]
    fn on_each_fans_out_sources() {
        let table = TableBuilder::new()
            .on_each(
                [TestState::Success, TestState::Error],
                TestEvent::Load,
                TestState::Loading,
            )
            .build()
            .unwrap();

        assert!(table.contains(&TestState::Success, &TestEvent::Load));
        assert!(table.contains(&TestState::Error, &TestEvent::Load));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn builder_errors_propagate() {
        let result = TableBuilder::<TestState, TestEvent>::new()
            .transition(TransitionBuilder::new().from(TestState::Idle).to(TestState::Loading));

        assert!(matches!(result, Err(BuildError::MissingEvent)));
    }

    #[test]
    fn prebuilt_rules_are_accepted() {
        let rule = TransitionBuilder::new()
            .from(TestState::Loading)
            .on(TestEvent::Fail)
            .to(TestState::Error)
            .then(|| {})
            .build()
            .unwrap();

        let table = TableBuilder::new().rule(rule).build().unwrap();
        let transition = table.get(&TestState::Loading, &TestEvent::Fail).unwrap();
        assert!(transition.effect().is_some());
    }
}
