//! Guard predicates and side effects attached to transitions.
//!
//! Guards decide whether a transition found in the table may commit.
//! Side effects run after a transition has committed. Both are stored
//! behind `Arc` so a table holding them can be shared across machines.

use super::context::Context;
use super::state::State;
use std::fmt;
use std::sync::Arc;

type Predicate<S> = Arc<dyn Fn(&S, &Context) -> bool + Send + Sync>;
type Callback<S> = Arc<dyn Fn(&S, &Context) + Send + Sync>;

/// Predicate that must hold for a transition to be accepted.
///
/// # Example
///
/// ```rust
/// use flowstate::core::{Context, Guard, State};
/// use serde::{Deserialize, Serialize};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Cart { Open }
///
/// impl State for Cart {
///     fn name(&self) -> &str { "Open" }
/// }
///
/// let in_stock = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&in_stock);
/// let guard: Guard<Cart> = Guard::new(move || flag.load(Ordering::SeqCst));
///
/// assert!(!guard.check(&Cart::Open, &Context::new()));
/// in_stock.store(true, Ordering::SeqCst);
/// assert!(guard.check(&Cart::Open, &Context::new()));
/// ```
pub struct Guard<S: State> {
    predicate: Predicate<S>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a zero-argument predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(move |_: &S, _: &Context| predicate()),
        }
    }

    /// Create a guard that inspects the current state and context.
    pub fn with_context<F>(predicate: F) -> Self
    where
        F: Fn(&S, &Context) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against the machine's current state and context.
    pub fn check(&self, state: &S, context: &Context) -> bool {
        (self.predicate)(state, context)
    }
}

impl<S: State> Clone for Guard<S> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// Callback invoked after a transition commits.
///
/// The observing form receives the post-transition state and context.
pub struct SideEffect<S: State> {
    callback: Callback<S>,
}

impl<S: State> SideEffect<S> {
    /// Create a side effect from a zero-argument callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(move |_: &S, _: &Context| callback()),
        }
    }

    /// Create a side effect that observes the committed state and context.
    pub fn observe<F>(callback: F) -> Self
    where
        F: Fn(&S, &Context) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    pub fn run(&self, state: &S, context: &Context) {
        (self.callback)(state, context)
    }
}

impl<S: State> Clone for SideEffect<S> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<S: State> fmt::Debug for SideEffect<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SideEffect(..)")
    }
}
