//! Form submission adapter.

use crate::adapters::error::{FetchError, WorkflowError};
use crate::adapters::loading::error_payload;
use crate::adapters::notify::{Notice, Notifier, SilentNotifier};
use crate::adapters::Fetch;
use crate::core::{context_of, Context};
use crate::engine::{Machine, MachineOptions};
use crate::validation::{FieldViolation, FormRules};
use crate::workflows::{form_machine, FormEvent, FormState};
use serde_json::{json, Value};
use std::sync::Arc;
use stillwater::effect::Effect;
use tracing::{debug, info, warn};

fn errors_payload(violations: &[FieldViolation]) -> Context {
    let errors: Vec<Value> = violations.iter().map(FieldViolation::to_value).collect();
    context_of(json!({ "errors": errors, "error": Value::Null }))
}

fn cleared() -> Context {
    context_of(json!({ "errors": [], "error": Value::Null }))
}

/// Submits a form through a form machine, validating it first when rules
/// are attached.
///
/// Violations are written to the machine context under `"errors"`; a
/// failed submit stores its message under `"error"`.
pub struct FormSubmission<F> {
    machine: Machine<FormState, FormEvent>,
    rules: Option<FormRules<F>>,
    notifier: Arc<dyn Notifier>,
}

impl<F> FormSubmission<F> {
    pub fn new(options: MachineOptions) -> Self {
        Self {
            machine: form_machine(options),
            rules: None,
            notifier: Arc::new(SilentNotifier),
        }
    }

    pub fn with_rules(mut self, rules: FormRules<F>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn machine(&self) -> &Machine<FormState, FormEvent> {
        &self.machine
    }

    pub fn state(&self) -> &FormState {
        self.machine.state()
    }

    /// Violations from the last validation.
    pub fn violations(&self) -> Vec<FieldViolation> {
        self.machine
            .context()
            .get("errors")
            .cloned()
            .and_then(|errors| serde_json::from_value(errors).ok())
            .unwrap_or_default()
    }

    pub fn error(&self) -> Option<&str> {
        self.machine.context().get("error").and_then(Value::as_str)
    }

    fn check(&self, form: &F) -> Vec<FieldViolation> {
        self.rules
            .as_ref()
            .map(|rules| rules.violations(form))
            .unwrap_or_default()
    }

    /// Run the attached rules through `Validating`.
    ///
    /// Only valid from `Idle`. On success the machine moves on to
    /// `Submitting`; on failure it settles in `Error`.
    pub fn validate(&mut self, form: &F) -> Result<(), WorkflowError> {
        self.machine.try_send(FormEvent::Validate, None)?;

        let violations = self.check(form);
        if violations.is_empty() {
            self.machine
                .try_send(FormEvent::ValidationSuccess, Some(cleared()))?;
            debug!(machine = %self.machine.label(), "form valid");
            return Ok(());
        }

        self.machine
            .try_send(FormEvent::ValidationError, Some(errors_payload(&violations)))?;
        self.invalid(violations)
    }

    fn invalid(&self, violations: Vec<FieldViolation>) -> Result<(), WorkflowError> {
        debug!(machine = %self.machine.label(), count = violations.len(), "form invalid");
        self.notifier.notify(Notice::warning(format!(
            "please correct {} field(s)",
            violations.len()
        )));
        Err(WorkflowError::Invalid(violations))
    }

    /// Move the machine into `Submitting`. Call before issuing the request.
    pub fn begin_submit(&mut self, form: &F) -> Result<(), WorkflowError> {
        match *self.machine.state() {
            FormState::Idle if self.rules.is_some() => self.validate(form),
            FormState::Idle => Ok(self.machine.try_send(FormEvent::Submit, Some(cleared()))?),
            FormState::Success | FormState::Error => {
                // Resubmission checks the rules without leaving the settled state.
                let violations = self.check(form);
                if !violations.is_empty() {
                    self.machine.merge_context(errors_payload(&violations));
                    return self.invalid(violations);
                }

                let event = if *self.machine.state() == FormState::Error {
                    FormEvent::Retry
                } else {
                    FormEvent::Submit
                };
                Ok(self.machine.try_send(event, Some(cleared()))?)
            }
            FormState::Validating | FormState::Submitting => {
                Err(WorkflowError::Busy("form submission"))
            }
        }
    }

    /// Settle the submission with the request's outcome.
    pub fn finish_submit<T>(&mut self, outcome: Result<T, FetchError>) -> Result<T, WorkflowError> {
        match outcome {
            Ok(response) => {
                self.machine.try_send(FormEvent::SubmitSuccess, None)?;
                info!(machine = %self.machine.label(), "form submitted");
                Ok(response)
            }
            Err(error) => {
                self.machine
                    .try_send(FormEvent::SubmitError, Some(error_payload(&error)))?;
                warn!(machine = %self.machine.label(), %error, "form submission failed");
                self.notifier.notify(Notice::error(error.to_string()));
                Err(error.into())
            }
        }
    }

    pub async fn submit<Env, T>(
        &mut self,
        env: &Env,
        form: &F,
        request: Fetch<T, Env>,
    ) -> Result<T, WorkflowError>
    where
        T: Send + 'static,
        Env: Clone + Send + Sync + 'static,
    {
        self.begin_submit(form)?;
        let outcome = request.run(env).await;
        self.finish_submit(outcome)
    }

    /// Back to `Idle` from a settled submission, dropping stale errors.
    pub fn reset(&mut self) -> bool {
        self.machine.send_with(FormEvent::Reset, cleared())
    }
}
