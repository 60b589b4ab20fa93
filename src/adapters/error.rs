//! Adapter error types.

use crate::engine::Rejection;
use crate::validation::FieldViolation;
use thiserror::Error;

/// Failure reported by an asynchronous fetch or submit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with an error status
    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// Errors surfaced by workflow adapters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    /// The machine refused the event
    #[error("transition rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The form failed one or more rules
    #[error("validation failed with {} violation(s)", .0.len())]
    Invalid(Vec<FieldViolation>),

    /// A payment is already in flight
    #[error("payment already in progress")]
    PaymentInProgress,

    /// Another operation of the same adapter is still running
    #[error("{0} is still in progress")]
    Busy(&'static str),

    /// The listing has no further pages
    #[error("no more pages to load")]
    Exhausted,
}
