//! Diagnostic side channel for machines.
//!
//! A machine never reaches for a global logger. It is handed a
//! [`Diagnostics`] sink at construction and calls it only while
//! `debug_enabled` is set. [`TracingDiagnostics`] forwards to `tracing`;
//! [`RecordingDiagnostics`] keeps records in memory for assertions.

use std::sync::Mutex;
use uuid::Uuid;

/// Identifies the machine a diagnostic came from.
#[derive(Clone, Copy, Debug)]
pub struct Source<'a> {
    pub id: Uuid,
    pub label: &'a str,
}

/// Sink for machine diagnostics.
pub trait Diagnostics: Send + Sync {
    /// A rejected transition or a bypass of the transition table.
    fn warn(&self, source: &Source<'_>, message: &str);

    /// A committed transition.
    fn info(&self, source: &Source<'_>, message: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, source: &Source<'_>, message: &str) {
        tracing::warn!(machine = %source.label, machine_id = %source.id, "{}", message);
    }

    fn info(&self, source: &Source<'_>, message: &str) {
        tracing::info!(machine = %source.label, machine_id = %source.id, "{}", message);
    }
}

/// Discards every diagnostic.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn warn(&self, _source: &Source<'_>, _message: &str) {}

    fn info(&self, _source: &Source<'_>, _message: &str) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Warn,
    Info,
}

/// One captured diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticRecord {
    pub level: Level,
    pub label: String,
    pub message: String,
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    records: Mutex<Vec<DiagnosticRecord>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::Warn)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages(Level::Info)
    }

    fn messages(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .map(|r| r.message)
            .collect()
    }

    fn record(&self, level: Level, source: &Source<'_>, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(DiagnosticRecord {
                level,
                label: source.label.to_string(),
                message: message.to_string(),
            });
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&self, source: &Source<'_>, message: &str) {
        self.record(Level::Warn, source, message);
    }

    fn info(&self, source: &Source<'_>, message: &str) {
        self.record(Level::Info, source, message);
    }
}
