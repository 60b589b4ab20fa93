//! Transition entries.

use crate::core::{Context, Guard, SideEffect, State};

/// The rule for one `(state, event)` pair.
///
/// A transition is either a bare target state or a structured record with
/// an optional guard and an optional side effect. The shape is resolved once
/// at lookup time through [`target`](Self::target), [`guard`](Self::guard)
/// and [`effect`](Self::effect).
#[derive(Clone, Debug)]
pub enum Transition<S: State> {
    /// Move to the target unconditionally
    Direct(S),

    /// Move to `target` if `guard` (when present) allows it, then run `effect`
    Guarded {
        target: S,
        guard: Option<Guard<S>>,
        effect: Option<SideEffect<S>>,
    },
}

impl<S: State> Transition<S> {
    pub fn target(&self) -> &S {
        match self {
            Self::Direct(target) => target,
            Self::Guarded { target, .. } => target,
        }
    }

    pub fn guard(&self) -> Option<&Guard<S>> {
        match self {
            Self::Direct(_) => None,
            Self::Guarded { guard, .. } => guard.as_ref(),
        }
    }

    pub fn effect(&self) -> Option<&SideEffect<S>> {
        match self {
            Self::Direct(_) => None,
            Self::Guarded { effect, .. } => effect.as_ref(),
        }
    }

    /// Check whether the guard (if any) lets this transition commit.
    pub fn permits(&self, current: &S, context: &Context) -> bool {
        self.guard().is_none_or(|g| g.check(current, context))
    }
}

impl<S: State> From<S> for Transition<S> {
    fn from(target: S) -> Self {
        Self::Direct(target)
    }
}
