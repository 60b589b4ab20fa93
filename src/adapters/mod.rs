//! Workflow adapters.
//!
//! Each adapter owns one or more machines and wraps an asynchronous request
//! in the events its workflow expects. Requests are Stillwater effects, run
//! against a caller-supplied environment:
//!
//! - `begin_*` sends the event that starts the request and refuses if the
//!   machine does not allow it
//! - the effect runs
//! - `finish_*` sends the success or failure event with its payload
//!
//! The async convenience methods (`load`, `submit`, `pay`, ...) do all
//! three. Since each one borrows the adapter mutably for the duration of
//! the request, a second request on the same adapter cannot start until
//! the first one settles.

pub mod checkout;
pub mod error;
pub mod form;
pub mod listing;
pub mod loading;
pub mod notify;

pub use checkout::{Checkout, PayType};
pub use error::{FetchError, WorkflowError};
pub use form::FormSubmission;
pub use listing::{Listing, Page};
pub use loading::Loader;
pub use notify::{Notice, NoticeLevel, Notifier, RecordingNotifier, SilentNotifier};

use stillwater::effect::BoxedEffect;

/// An asynchronous request as adapters consume it.
pub type Fetch<T, Env> = BoxedEffect<T, FetchError, Env>;
