//! Checkout workflow: load the order, pick a payment method, pay once.
//!
//! ```text
//! IDLE --LOAD--> LOADING --LOAD_SUCCESS--> READY
//!                LOADING --LOAD_ERROR----> ERROR --RETRY--> LOADING
//! READY --CHANGE_PAY_TYPE--> READY
//! READY --PAY--> PAYING --PAY_SUCCESS--> SUCCESS
//!                PAYING --PAY_ERROR----> READY
//! ```
//!
//! `PAYING` has no `PAY` transition. That missing edge is what stops a
//! second payment from being submitted while one is in flight.

use crate::builder::TableBuilder;
use crate::engine::{Machine, MachineDefinition, MachineOptions};
use crate::table::TransitionTable;
use crate::{event_enum, state_enum};
use std::sync::{Arc, LazyLock};

state_enum! {
    pub enum CheckoutState {
        Idle,
        Loading,
        Ready,
        Paying,
        Success,
        Error,
    }
    final: [Success]
    error: [Error]
}

event_enum! {
    pub enum CheckoutEvent {
        Load,
        LoadSuccess,
        LoadError,
        ChangePayType,
        Pay,
        PaySuccess,
        PayError,
        Retry,
    }
}

static CHECKOUT_TABLE: LazyLock<Arc<TransitionTable<CheckoutState, CheckoutEvent>>> =
    LazyLock::new(|| {
        let table = TableBuilder::new()
            .on(CheckoutState::Idle, CheckoutEvent::Load, CheckoutState::Loading)
            .on(CheckoutState::Loading, CheckoutEvent::LoadSuccess, CheckoutState::Ready)
            .on(CheckoutState::Loading, CheckoutEvent::LoadError, CheckoutState::Error)
            .on(CheckoutState::Ready, CheckoutEvent::ChangePayType, CheckoutState::Ready)
            .on(CheckoutState::Ready, CheckoutEvent::Pay, CheckoutState::Paying)
            .on(CheckoutState::Paying, CheckoutEvent::PaySuccess, CheckoutState::Success)
            .on(CheckoutState::Paying, CheckoutEvent::PayError, CheckoutState::Ready)
            .on(CheckoutState::Error, CheckoutEvent::Retry, CheckoutState::Loading)
            .build()
            .expect("checkout table is well-formed");
        Arc::new(table)
    });

/// The shared checkout table.
pub fn checkout_table() -> Arc<TransitionTable<CheckoutState, CheckoutEvent>> {
    Arc::clone(&CHECKOUT_TABLE)
}

/// A fresh checkout machine in `Idle`.
pub fn checkout_machine(options: MachineOptions) -> Machine<CheckoutState, CheckoutEvent> {
    Machine::create(
        MachineDefinition::new(CheckoutState::Idle, checkout_table()).with_options(options),
    )
}
