//! The state machine engine.
//!
//! # Key Concepts
//!
//! - **Machine**: holds the current state, context and history; evaluates
//!   events against its table
//! - **Definition / Options**: construction input, including the debug flag
//! - **Rejection**: why an event was refused (never raised as a panic)
//! - **Diagnostics**: the injected logging capability used when debugging
//!
//! Commits are synchronous: once `send` returns `true`, `state()` and
//! `context()` already reflect the transition.

mod diagnostics;
mod machine;
mod options;
mod rejection;

pub use diagnostics::{
    DiagnosticRecord, Diagnostics, Level, RecordingDiagnostics, SilentDiagnostics, Source,
    TracingDiagnostics,
};
pub use machine::{Machine, MachineDefinition};
pub use options::MachineOptions;
pub use rejection::Rejection;
