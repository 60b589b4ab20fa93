//! Loading workflow: fetch once, then reload or retry.
//!
//! ```text
//! IDLE --LOAD--> LOADING --SUCCESS--> SUCCESS
//!                LOADING --ERROR----> ERROR
//! SUCCESS | ERROR --LOAD | RETRY--> LOADING
//! SUCCESS | ERROR --RESET---------> IDLE
//! ```

use crate::builder::TableBuilder;
use crate::engine::{Machine, MachineDefinition, MachineOptions};
use crate::table::TransitionTable;
use crate::{event_enum, state_enum};
use std::sync::{Arc, LazyLock};

state_enum! {
    /// States of a single fetch.
    pub enum LoadState {
        Idle,
        Loading,
        Success,
        Error,
    }
    error: [Error]
}

event_enum! {
    /// Events of a single fetch.
    pub enum LoadEvent {
        Load,
        Success,
        Error,
        Retry,
        Reset,
    }
}

static LOADING_TABLE: LazyLock<Arc<TransitionTable<LoadState, LoadEvent>>> = LazyLock::new(|| {
    let settled = [LoadState::Success, LoadState::Error];
    let table = TableBuilder::new()
        .on(LoadState::Idle, LoadEvent::Load, LoadState::Loading)
        .on(LoadState::Loading, LoadEvent::Success, LoadState::Success)
        .on(LoadState::Loading, LoadEvent::Error, LoadState::Error)
        .on_each(settled, LoadEvent::Load, LoadState::Loading)
        .on_each(settled, LoadEvent::Retry, LoadState::Loading)
        .on_each(settled, LoadEvent::Reset, LoadState::Idle)
        .build()
        .expect("loading table is well-formed");
    Arc::new(table)
});

/// The shared loading table.
pub fn loading_table() -> Arc<TransitionTable<LoadState, LoadEvent>> {
    Arc::clone(&LOADING_TABLE)
}

/// A fresh loading machine in `Idle`.
pub fn loading_machine(options: MachineOptions) -> Machine<LoadState, LoadEvent> {
    Machine::create(MachineDefinition::new(LoadState::Idle, loading_table()).with_options(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    #[test]
    fn table_has_every_documented_edge() {
        let table = loading_table();
        assert_eq!(table.len(), 9);

        assert!(table.contains(&LoadState::Idle, &LoadEvent::Load));
        assert!(table.contains(&LoadState::Success, &LoadEvent::Retry));
        assert!(table.contains(&LoadState::Error, &LoadEvent::Reset));
        assert!(!table.contains(&LoadState::Loading, &LoadEvent::Load));
        assert!(!table.contains(&LoadState::Idle, &LoadEvent::Reset));
    }

    #[test]
    fn table_is_shared_between_machines() {
        let a = loading_machine(MachineOptions::default());
        let b = loading_machine(MachineOptions::default());
        assert!(a.shares_table(&b));
    }

    #[test]
    fn reload_from_success() {
        let mut machine = loading_machine(MachineOptions::default());

        assert!(machine.send(LoadEvent::Load));
        assert_eq!(machine.state(), &LoadState::Loading);
        assert!(machine.send(LoadEvent::Success));
        assert_eq!(machine.state(), &LoadState::Success);
        assert!(machine.send(LoadEvent::Load));
        assert_eq!(machine.state(), &LoadState::Loading);
    }

    #[test]
    fn loading_rejects_a_second_load() {
        let mut machine = loading_machine(MachineOptions::default());

        assert!(machine.send(LoadEvent::Load));
        assert!(!machine.send(LoadEvent::Load));
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn error_retries_and_resets() {
        let mut machine = loading_machine(MachineOptions::default());
        machine.send(LoadEvent::Load);
        machine.send(LoadEvent::Error);
        assert!(machine.state().is_error());

        assert!(machine.send(LoadEvent::Retry));
        assert!(machine.send(LoadEvent::Error));
        assert!(machine.send(LoadEvent::Reset));
        assert_eq!(machine.state(), &LoadState::Idle);
    }
}
