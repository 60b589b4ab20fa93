//! Builder API for ergonomic table and machine construction.
//!
//! This module provides fluent builders and macros for declaring workflows
//! with minimal boilerplate while keeping the resulting tables immutable.

pub mod error;
pub mod machine;
pub mod macros;
pub mod table;
pub mod transition;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use table::TableBuilder;
pub use transition::{TransitionBuilder, TransitionRule};

use crate::core::{Event, Guard, State};
use crate::table::Transition;

/// Create an unconditional rule.
///
/// # Example
///
/// ```
/// use flowstate::builder::{simple_transition, TableBuilder};
/// use flowstate::{event_enum, state_enum};
///
/// state_enum! {
///     enum Step { Start, End }
///     final: [End]
/// }
///
/// event_enum! {
///     enum Go { Next }
/// }
///
/// let table = TableBuilder::new()
///     .rule(simple_transition(Step::Start, Go::Next, Step::End))
///     .build()
///     .unwrap();
/// assert!(table.contains(&Step::Start, &Go::Next));
/// ```
pub fn simple_transition<S: State, E: Event>(from: S, event: E, to: S) -> TransitionRule<S, E> {
    TransitionRule {
        from,
        event,
        transition: to.into(),
    }
}

/// Create a rule with a zero-argument guard.
pub fn guarded_transition<S, E, F>(from: S, event: E, to: S, guard: F) -> TransitionRule<S, E>
where
    S: State,
    E: Event,
    F: Fn() -> bool + Send + Sync + 'static,
{
    TransitionRule {
        from,
        event,
        transition: Transition::Guarded {
            target: to,
            guard: Some(Guard::new(guard)),
            effect: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Context;
    use crate::{event_enum, state_enum};

    state_enum! {
        enum TestState {
            Start,
            Middle,
            End,
        }
        final: [End]
    }

    event_enum! {
        enum TestEvent {
            Advance,
        }
    }

    #[test]
    fn simple_transition_builds_direct_rule() {
        let rule = simple_transition(TestState::Start, TestEvent::Advance, TestState::Middle);

        assert_eq!(rule.from, TestState::Start);
        assert!(matches!(rule.transition, Transition::Direct(TestState::Middle)));
    }

    #[test]
    fn guarded_transition_respects_guard() {
        let rule =
            guarded_transition(TestState::Middle, TestEvent::Advance, TestState::End, || false);

        assert_eq!(rule.transition.target(), &TestState::End);
        assert!(!rule.transition.permits(&TestState::Middle, &Context::new()));
    }
}
