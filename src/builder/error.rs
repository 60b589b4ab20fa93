//! Build errors for machine, table and transition builders.

use thiserror::Error;

/// Errors that can occur when building machines, tables and transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Transition table not specified. Call .table(table) before .build()")]
    MissingTable,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition for event '{event}' from state '{state}' is defined twice")]
    DuplicateTransition { state: String, event: String },
}
