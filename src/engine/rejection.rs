//! Reasons a machine refuses an event.

use thiserror::Error;

/// Why [`Machine::try_send`](super::Machine::try_send) refused an event.
///
/// Rejections are routine outcomes (blocking a double submit is one), not
/// failures: `send` turns them into `false` and `can` into `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The current state has no row in the table
    #[error("no transitions defined for state '{state}'")]
    NoStateEntry { state: String },

    /// The current state's row has no entry for the event
    #[error("no transition for event '{event}' from state '{state}'")]
    NoTransition { state: String, event: String },

    /// A transition exists but its guard vetoed it
    #[error("guard rejected event '{event}' from state '{state}' to '{target}'")]
    GuardRejected {
        state: String,
        event: String,
        target: String,
    },
}

impl Rejection {
    /// Whether the table lacks the transition (as opposed to a guard veto).
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::NoStateEntry { .. } | Self::NoTransition { .. })
    }

    pub fn is_guard_rejection(&self) -> bool {
        matches!(self, Self::GuardRejected { .. })
    }
}
