//! Single-resource loading adapter.

use crate::adapters::error::{FetchError, WorkflowError};
use crate::adapters::notify::{Notice, Notifier, SilentNotifier};
use crate::adapters::Fetch;
use crate::core::{context_of, Context};
use crate::engine::{Machine, MachineOptions};
use crate::workflows::{loading_machine, LoadEvent, LoadState};
use serde_json::{json, Value};
use std::sync::Arc;
use stillwater::effect::Effect;
use tracing::{debug, warn};

/// Move a loading machine into `Loading`, retrying from `Error`.
pub(crate) fn begin_load(machine: &mut Machine<LoadState, LoadEvent>) -> Result<(), WorkflowError> {
    let event = match machine.state() {
        LoadState::Error => LoadEvent::Retry,
        _ => LoadEvent::Load,
    };

    match machine.try_send(event, None) {
        Ok(()) => {
            debug!(machine = %machine.label(), "load started");
            Ok(())
        }
        Err(_) if *machine.state() == LoadState::Loading => Err(WorkflowError::Busy("load")),
        Err(rejection) => Err(rejection.into()),
    }
}

/// Settle a loading machine as failed and tell the user.
pub(crate) fn fail_load(
    machine: &mut Machine<LoadState, LoadEvent>,
    notifier: &dyn Notifier,
    error: FetchError,
) -> WorkflowError {
    if let Err(rejection) = machine.try_send(LoadEvent::Error, Some(error_payload(&error))) {
        return rejection.into();
    }

    warn!(machine = %machine.label(), %error, "load failed");
    notifier.notify(Notice::error(error.to_string()));
    error.into()
}

pub(crate) fn error_payload(error: &FetchError) -> Context {
    context_of(json!({ "error": error.to_string() }))
}

pub(crate) fn cleared_error() -> Context {
    context_of(json!({ "error": Value::Null }))
}

/// Loads one resource through a loading machine.
///
/// The machine decides whether a fetch may start: a second `load` while
/// one is in flight is refused before any request is made.
pub struct Loader<T> {
    machine: Machine<LoadState, LoadEvent>,
    data: Option<T>,
    notifier: Arc<dyn Notifier>,
}

impl<T> Loader<T> {
    pub fn new(options: MachineOptions) -> Self {
        Self {
            machine: loading_machine(options),
            data: None,
            notifier: Arc::new(SilentNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn machine(&self) -> &Machine<LoadState, LoadEvent> {
        &self.machine
    }

    pub fn state(&self) -> &LoadState {
        self.machine.state()
    }

    pub fn is_loading(&self) -> bool {
        *self.machine.state() == LoadState::Loading
    }

    /// The last successfully loaded value.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// The message of the last failed load, until a load succeeds.
    pub fn error(&self) -> Option<&str> {
        self.machine.context().get("error").and_then(Value::as_str)
    }

    /// Enter `Loading`. Call before issuing the request.
    pub fn begin(&mut self) -> Result<(), WorkflowError> {
        begin_load(&mut self.machine)
    }

    /// Settle the load with the request's outcome.
    pub fn finish(&mut self, outcome: Result<T, FetchError>) -> Result<&T, WorkflowError> {
        match outcome {
            Ok(value) => {
                self.machine
                    .try_send(LoadEvent::Success, Some(cleared_error()))?;
                debug!(machine = %self.machine.label(), "load succeeded");
                Ok(&*self.data.insert(value))
            }
            Err(error) => Err(fail_load(&mut self.machine, self.notifier.as_ref(), error)),
        }
    }

    /// Run `fetch` against `env` between [`begin`](Self::begin) and
    /// [`finish`](Self::finish).
    pub async fn load<Env>(&mut self, env: &Env, fetch: Fetch<T, Env>) -> Result<&T, WorkflowError>
    where
        T: Send + 'static,
        Env: Clone + Send + Sync + 'static,
    {
        self.begin()?;
        let outcome = fetch.run(env).await;
        self.finish(outcome)
    }

    /// Return to `Idle`, dropping loaded data. Only settled loads reset.
    pub fn reset(&mut self) -> bool {
        if self.machine.send(LoadEvent::Reset) {
            self.data = None;
            true
        } else {
            false
        }
    }
}
