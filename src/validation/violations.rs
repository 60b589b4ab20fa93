//! Field-level validation failures.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// One rule a form field failed.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// JSON form stored in a machine's context.
    pub fn to_value(&self) -> Value {
        json!({ "field": self.field, "message": self.message })
    }
}
