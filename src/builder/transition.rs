//! Builder for constructing individual transitions.

use crate::builder::error::BuildError;
use crate::core::{Context, Event, Guard, SideEffect, State};
use crate::table::Transition;

/// A transition together with the `(state, event)` pair it is keyed by.
#[derive(Clone, Debug)]
pub struct TransitionRule<S: State, E: Event> {
    pub from: S,
    pub event: E,
    pub transition: Transition<S>,
}

/// Builder for constructing transitions with a fluent API.
///
/// A rule without a guard or effect builds to [`Transition::Direct`];
/// anything else builds to [`Transition::Guarded`].
pub struct TransitionBuilder<S: State, E: Event> {
    from: Option<S>,
    event: Option<E>,
    to: Option<S>,
    guard: Option<Guard<S>>,
    effect: Option<SideEffect<S>>,
}

impl<S: State, E: Event> TransitionBuilder<S, E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            to: None,
            guard: None,
            effect: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard (optional).
    pub fn guard(mut self, guard: Guard<S>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a zero-argument guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Add a guard that inspects state and context (optional).
    pub fn when_context<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&S, &Context) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::with_context(predicate));
        self
    }

    /// Attach a side effect (optional).
    pub fn effect(mut self, effect: SideEffect<S>) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Attach a zero-argument side effect using a closure (optional).
    pub fn then<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.effect = Some(SideEffect::new(callback));
        self
    }

    /// Build the rule.
    pub fn build(self) -> Result<TransitionRule<S, E>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        let transition = match (self.guard, self.effect) {
            (None, None) => Transition::Direct(to),
            (guard, effect) => Transition::Guarded {
                target: to,
                guard,
                effect,
            },
        };

        Ok(TransitionRule {
            from,
            event,
            transition,
        })
    }
}

impl<S: State, E: Event> Default for TransitionBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
