//! Core state machine types.
//!
//! This module contains the building blocks every machine is made of:
//! - State and event tags via the `State` and `Event` traits
//! - The free-form `Context` record and its shallow merge
//! - Guard predicates and post-commit side effects
//! - The bounded transition history
//!
//! Nothing here performs I/O; logging and async work live in the
//! `engine` and `adapters` modules.

mod context;
mod guard;
mod history;
mod state;

pub use context::{context_of, merge, Context, ContextUpdate};
pub use guard::{Guard, SideEffect};
pub use history::{HistoryEntry, HistoryRing, HISTORY_CAPACITY};
pub use state::{Event, State};
