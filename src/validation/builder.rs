//! Builder API for creating form rules.

use crate::validation::rules::{FieldCheck, FormRules};
use crate::validation::violations::FieldViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder for creating form rules
pub struct RulesBuilder<F> {
    checks: Vec<FieldCheck<F>>,
}

impl<F> RulesBuilder<F> {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a custom validation check
    pub fn require<C>(mut self, check: C) -> Self
    where
        C: Fn(&F) -> Validation<(), NonEmptyVec<FieldViolation>> + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Add a simple predicate check for one field
    pub fn require_pred<P>(mut self, field: &str, predicate: P, message: &str) -> Self
    where
        P: Fn(&F) -> bool + Send + Sync + 'static,
    {
        let violation = FieldViolation::new(field, message);
        let check = move |form: &F| {
            if predicate(form) {
                Validation::success(())
            } else {
                Validation::fail(violation.clone())
            }
        };
        self.checks.push(Box::new(check));
        self
    }

    /// Build the rules
    pub fn build(self) -> FormRules<F> {
        FormRules {
            checks: self.checks,
        }
    }
}

impl<F> Default for RulesBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}
