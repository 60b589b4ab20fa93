//! State and event tags.
//!
//! Every machine is parameterized by a state type and an event type. Both
//! are opaque, comparable identifiers drawn from a finite set, which in
//! practice means fieldless enums (see [`state_enum!`](crate::state_enum)
//! and [`event_enum!`](crate::event_enum)).

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// States are used as keys in a transition table, so they must be hashable
/// as well as comparable.
///
/// # Required Traits
///
/// - `Clone`: States are copied into history entries
/// - `Eq` + `Hash`: States key the transition table
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: History snapshots are exported as JSON
///
/// # Example
///
/// ```rust
/// use flowstate::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum FetchState {
///     Idle,
///     Loading,
///     Loaded,
///     Failed,
/// }
///
/// impl State for FetchState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Loading => "Loading",
///             Self::Loaded => "Loaded",
///             Self::Failed => "Failed",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Failed)
///     }
/// }
///
/// assert_eq!(FetchState::Loading.name(), "Loading");
/// assert!(FetchState::Failed.is_error());
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Final states have no outgoing transitions in a well-formed table.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Trait for events that request a transition.
pub trait Event:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &str;
}
