//! Canonical storefront workflows.
//!
//! Each workflow declares its state and event enums and one transition
//! table. Tables are built on first use and then shared by every machine of
//! that workflow; nothing about them changes afterwards.

mod checkout;
mod form;
mod loading;

pub use checkout::{checkout_machine, checkout_table, CheckoutEvent, CheckoutState};
pub use form::{form_machine, form_table, FormEvent, FormState};
pub use loading::{loading_machine, loading_table, LoadEvent, LoadState};
