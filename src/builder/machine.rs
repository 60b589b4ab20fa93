//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::{Context, Event, State};
use crate::engine::{Diagnostics, Machine, MachineDefinition, MachineOptions};
use crate::table::TransitionTable;
use std::sync::Arc;

/// Builder for constructing machines with a fluent API.
pub struct MachineBuilder<S: State, E: Event> {
    initial: Option<S>,
    table: Option<Arc<TransitionTable<S, E>>>,
    context: Option<Context>,
    options: MachineOptions,
    diagnostics: Option<Arc<dyn Diagnostics>>,
}

impl<S: State, E: Event> MachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            table: None,
            context: None,
            options: MachineOptions::default(),
            diagnostics: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the shared transition table (required).
    pub fn table(mut self, table: Arc<TransitionTable<S, E>>) -> Self {
        self.table = Some(table);
        self
    }

    /// Set the starting context (optional, defaults to empty).
    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn options(mut self, options: MachineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.options.debug_enabled = enabled;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.options.label = Some(label.into());
        self
    }

    /// Inject the diagnostics sink (optional, defaults to `tracing`).
    pub fn diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Build the machine.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<Machine<S, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let table = self.table.ok_or(BuildError::MissingTable)?;

        let mut definition = MachineDefinition::new(initial, table).with_options(self.options);
        definition.context = self.context;
        definition.diagnostics = self.diagnostics;

        Ok(Machine::create(definition))
    }
}

impl<S: State, E: Event> Default for MachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
