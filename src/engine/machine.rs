//! The table-driven state machine.

use super::diagnostics::{Diagnostics, Source, TracingDiagnostics};
use super::options::MachineOptions;
use super::rejection::Rejection;
use crate::core::{merge, Context, ContextUpdate, Event, HistoryEntry, HistoryRing, State};
use crate::table::{Transition, TransitionTable};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Everything needed to create a machine.
pub struct MachineDefinition<S: State, E: Event> {
    pub initial: S,
    pub transitions: Arc<TransitionTable<S, E>>,
    pub context: Option<Context>,
    pub options: MachineOptions,
    /// Defaults to [`TracingDiagnostics`]
    pub diagnostics: Option<Arc<dyn Diagnostics>>,
}

impl<S: State, E: Event> MachineDefinition<S, E> {
    pub fn new(initial: S, transitions: Arc<TransitionTable<S, E>>) -> Self {
        Self {
            initial,
            transitions,
            context: None,
            options: MachineOptions::default(),
            diagnostics: None,
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_options(mut self, options: MachineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }
}

/// A finite state machine driven by an immutable transition table.
///
/// The machine owns its current state, a free-form context record and a
/// bounded history. Every change goes through [`send`](Self::send) (or the
/// [`set_state`](Self::set_state) escape hatch); rejected events are silent
/// no-ops.
///
/// # Example
///
/// ```rust
/// use flowstate::workflows::{checkout_machine, CheckoutEvent, CheckoutState};
/// use flowstate::engine::MachineOptions;
///
/// let mut machine = checkout_machine(MachineOptions::default());
/// assert!(machine.send(CheckoutEvent::Load));
/// assert!(machine.send(CheckoutEvent::LoadSuccess));
/// assert_eq!(machine.state(), &CheckoutState::Ready);
///
/// assert!(machine.send(CheckoutEvent::Pay));
/// assert!(!machine.send(CheckoutEvent::Pay)); // already paying
/// assert_eq!(machine.state(), &CheckoutState::Paying);
/// ```
pub struct Machine<S: State, E: Event> {
    id: Uuid,
    label: String,
    state: S,
    context: Context,
    history: HistoryRing<S, E>,
    table: Arc<TransitionTable<S, E>>,
    debug_enabled: bool,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<S: State, E: Event> Machine<S, E> {
    /// Create a machine in the definition's initial state.
    pub fn create(definition: MachineDefinition<S, E>) -> Self {
        let id = Uuid::new_v4();
        let label = definition
            .options
            .label
            .unwrap_or_else(|| id.to_string());

        Self {
            id,
            label,
            state: definition.initial,
            context: definition.context.unwrap_or_default(),
            history: HistoryRing::new(),
            table: definition.transitions,
            debug_enabled: definition.options.debug_enabled,
            diagnostics: definition
                .diagnostics
                .unwrap_or_else(|| Arc::new(TracingDiagnostics)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get current context
    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn table(&self) -> &Arc<TransitionTable<S, E>> {
        &self.table
    }

    /// Whether both machines were built from the same table allocation.
    pub fn shares_table(&self, other: &Machine<S, E>) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }

    pub fn is_final(&self) -> bool {
        self.state.is_final()
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    /// Check whether `event` would be accepted right now.
    ///
    /// Evaluates the guard, if any, but changes nothing.
    pub fn can(&self, event: &E) -> bool {
        resolve(&self.table, &self.state, event, &self.context).is_ok()
    }

    /// Events the machine would currently accept.
    pub fn available_events(&self) -> Vec<E> {
        self.table
            .events_from(&self.state)
            .filter(|event| self.can(event))
            .cloned()
            .collect()
    }

    /// Request a transition. Returns `true` if it committed.
    pub fn send(&mut self, event: E) -> bool {
        self.try_send(event, None).is_ok()
    }

    /// Request a transition and merge `payload` into the context on commit.
    pub fn send_with(&mut self, event: E, payload: Context) -> bool {
        self.try_send(event, Some(payload)).is_ok()
    }

    /// Request a transition, reporting why it was refused.
    ///
    /// On acceptance the commit happens in a fixed order: the history entry
    /// is appended, the state is replaced, the payload is merged into the
    /// context, and finally the transition's side effect runs and observes
    /// the new state and context. On rejection nothing changes.
    pub fn try_send(&mut self, event: E, payload: Option<Context>) -> Result<(), Rejection> {
        let table = Arc::clone(&self.table);
        let transition = match resolve(&table, &self.state, &event, &self.context) {
            Ok(transition) => transition,
            Err(rejection) => {
                self.warn(&rejection.to_string());
                return Err(rejection);
            }
        };

        let target = transition.target().clone();
        self.history
            .push(HistoryEntry::now(self.state.clone(), event.clone(), target.clone()));
        let from = std::mem::replace(&mut self.state, target);

        let logged_payload = match (&payload, self.debug_enabled) {
            (Some(payload), true) => Value::Object(payload.clone()).to_string(),
            _ => "none".to_string(),
        };
        if let Some(payload) = payload {
            self.context = merge(&self.context, payload);
        }

        if self.debug_enabled {
            let message = format!(
                "{} --{}--> {} (payload: {})",
                from.name(),
                event.name(),
                self.state.name(),
                logged_payload
            );
            self.diagnostics.info(&self.source(), &message);
        }

        if let Some(effect) = transition.effect() {
            effect.run(&self.state, &self.context);
        }

        Ok(())
    }

    /// Overwrite the current state, bypassing the table, guards and history.
    ///
    /// Prefer a dedicated reset event in the table; this exists for hard
    /// resets that no transition models.
    pub fn set_state(&mut self, state: S) {
        if self.debug_enabled {
            let message = format!(
                "state overwritten outside the transition table: {} -> {}",
                self.state.name(),
                state.name()
            );
            self.diagnostics.warn(&self.source(), &message);
        }
        self.state = state;
    }

    /// Replace the context with the result of `update`.
    pub fn set_context(&mut self, update: ContextUpdate) {
        self.context = update.apply(&self.context);
    }

    /// Shallow-merge `partial` into the context.
    pub fn merge_context(&mut self, partial: Context) {
        self.set_context(ContextUpdate::Merge(partial));
    }

    /// Derive the next context from the previous one.
    pub fn update_context<F>(&mut self, f: F)
    where
        F: FnOnce(&Context) -> Context + Send + 'static,
    {
        self.set_context(ContextUpdate::derive(f));
    }

    /// Snapshot of the history, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry<S, E>> {
        self.history.snapshot()
    }

    pub fn history_ring(&self) -> &HistoryRing<S, E> {
        &self.history
    }

    /// The history snapshot as JSON, for diagnostic dumps.
    pub fn history_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.history.snapshot())
    }

    fn source(&self) -> Source<'_> {
        Source {
            id: self.id,
            label: &self.label,
        }
    }

    fn warn(&self, message: &str) {
        if self.debug_enabled {
            self.diagnostics.warn(&self.source(), message);
        }
    }
}

impl<S: State, E: Event> fmt::Debug for Machine<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("state", &self.state)
            .field("context", &self.context)
            .field("history_len", &self.history.len())
            .field("debug_enabled", &self.debug_enabled)
            .finish()
    }
}

/// Look up and guard-check the transition for `event` from `state`.
fn resolve<'t, S: State, E: Event>(
    table: &'t TransitionTable<S, E>,
    state: &S,
    event: &E,
    context: &Context,
) -> Result<&'t Transition<S>, Rejection> {
    let row = table.row(state).ok_or_else(|| Rejection::NoStateEntry {
        state: state.name().to_string(),
    })?;

    let transition = row.get(event).ok_or_else(|| Rejection::NoTransition {
        state: state.name().to_string(),
        event: event.name().to_string(),
    })?;

    if !transition.permits(state, context) {
        return Err(Rejection::GuardRejected {
            state: state.name().to_string(),
            event: event.name().to_string(),
            target: transition.target().name().to_string(),
        });
    }

    Ok(transition)
}
