//! Accumulating validation for form submissions.
//!
//! Rules are evaluated with Stillwater's `Validation` type, so a form is
//! checked against every rule and ALL violations come back together
//! instead of one at a time.
//!
//! # Example
//!
//! ```rust
//! use flowstate::validation::{FormRules, RulesBuilder};
//!
//! struct Signup {
//!     email: String,
//!     password: String,
//! }
//!
//! let rules: FormRules<Signup> = RulesBuilder::new()
//!     .require_pred("email", |s: &Signup| s.email.contains('@'), "is not an address")
//!     .require_pred("password", |s: &Signup| s.password.len() >= 8, "is too short")
//!     .build();
//!
//! let form = Signup { email: "nobody".into(), password: "pw".into() };
//! assert_eq!(rules.violations(&form).len(), 2);
//! ```

pub mod builder;
pub mod rules;
pub mod violations;

pub use builder::RulesBuilder;
pub use rules::{FieldCheck, FormRules};
pub use violations::FieldViolation;
