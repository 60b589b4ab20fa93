//! Form rules evaluated with `Validation`.

use crate::validation::violations::FieldViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for field check functions
pub type FieldCheck<F> =
    Box<dyn Fn(&F) -> Validation<(), NonEmptyVec<FieldViolation>> + Send + Sync>;

/// Rules a form must satisfy before it is submitted.
/// Uses Validation to accumulate ALL violations.
pub struct FormRules<F> {
    pub(crate) checks: Vec<FieldCheck<F>>,
}

impl<F> FormRules<F> {
    /// Run every check, accumulating ALL violations.
    /// Returns Validation::Success(()) if all checks pass.
    pub fn validate(&self, form: &F) -> Validation<(), NonEmptyVec<FieldViolation>> {
        let checks: Vec<Validation<(), NonEmptyVec<FieldViolation>>> =
            self.checks.iter().map(|check| check(form)).collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// The violations as a plain list; empty when the form is valid.
    pub fn violations(&self, form: &F) -> Vec<FieldViolation> {
        match self.validate(form) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
