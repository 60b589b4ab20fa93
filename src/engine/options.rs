//! Construction-time options for a machine.

use serde::{Deserialize, Serialize};

/// Options shared by every machine constructor.
///
/// Options can be written inline or read from a JSON document:
///
/// ```rust
/// use flowstate::engine::MachineOptions;
///
/// let options = MachineOptions::from_json(r#"{ "debug_enabled": true, "label": "checkout" }"#)
///     .unwrap();
///
/// assert!(options.debug_enabled);
/// assert_eq!(options.label.as_deref(), Some("checkout"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    /// Emit diagnostics for commits and rejections
    pub debug_enabled: bool,
    /// Name used in diagnostics; defaults to the machine's id
    pub label: Option<String>,
}

impl MachineOptions {
    /// Options with diagnostics switched on.
    pub fn debug() -> Self {
        Self {
            debug_enabled: true,
            label: None,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
