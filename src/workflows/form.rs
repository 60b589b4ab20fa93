//! Form workflow: optional validation, then submission.
//!
//! ```text
//! IDLE --VALIDATE--> VALIDATING --VALIDATION_SUCCESS--> SUBMITTING
//! IDLE --SUBMIT----> SUBMITTING   VALIDATING --VALIDATION_ERROR--> ERROR
//! SUBMITTING --SUBMIT_SUCCESS--> SUCCESS
//! SUBMITTING --SUBMIT_ERROR----> ERROR
//! SUCCESS | ERROR --SUBMIT | RETRY--> SUBMITTING
//! SUCCESS | ERROR --RESET----------> IDLE
//! ```

use crate::builder::TableBuilder;
use crate::engine::{Machine, MachineDefinition, MachineOptions};
use crate::table::TransitionTable;
use crate::{event_enum, state_enum};
use std::sync::{Arc, LazyLock};

state_enum! {
    pub enum FormState {
        Idle,
        Validating,
        Submitting,
        Success,
        Error,
    }
    error: [Error]
}

event_enum! {
    pub enum FormEvent {
        Validate,
        ValidationSuccess,
        ValidationError,
        Submit,
        SubmitSuccess,
        SubmitError,
        Retry,
        Reset,
    }
}

static FORM_TABLE: LazyLock<Arc<TransitionTable<FormState, FormEvent>>> = LazyLock::new(|| {
    let settled = [FormState::Success, FormState::Error];
    let table = TableBuilder::new()
        .on(FormState::Idle, FormEvent::Validate, FormState::Validating)
        .on(FormState::Idle, FormEvent::Submit, FormState::Submitting)
        .on(FormState::Validating, FormEvent::ValidationSuccess, FormState::Submitting)
        .on(FormState::Validating, FormEvent::ValidationError, FormState::Error)
        .on(FormState::Submitting, FormEvent::SubmitSuccess, FormState::Success)
        .on(FormState::Submitting, FormEvent::SubmitError, FormState::Error)
        .on_each(settled, FormEvent::Submit, FormState::Submitting)
        .on_each(settled, FormEvent::Retry, FormState::Submitting)
        .on_each(settled, FormEvent::Reset, FormState::Idle)
        .build()
        .expect("form table is well-formed");
    Arc::new(table)
});

/// The shared form table.
pub fn form_table() -> Arc<TransitionTable<FormState, FormEvent>> {
    Arc::clone(&FORM_TABLE)
}

/// A fresh form machine in `Idle`.
pub fn form_machine(options: MachineOptions) -> Machine<FormState, FormEvent> {
    Machine::create(MachineDefinition::new(FormState::Idle, form_table()).with_options(options))
}
