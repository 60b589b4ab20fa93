//! Flowstate: table-driven state machines for storefront workflows
//!
//! Every asynchronous, user-visible workflow (loading a resource, paging a
//! list, submitting a form, paying for an order) is modeled as a machine
//! whose state is exactly one of a closed set. Events move the machine only
//! along the edges of an immutable transition table; anything else is
//! rejected and leaves the machine untouched. That rejection is what keeps
//! a double-tapped pay button from charging twice.
//!
//! # Core Concepts
//!
//! - **State / Event**: fieldless enums declared with [`state_enum!`] and
//!   [`event_enum!`]
//! - **Transition table**: `(state, event) -> target`, optionally guarded and
//!   with a side effect, shared by every machine of a workflow
//! - **Context**: a flat JSON record shallow-merged with event payloads
//! - **History**: the last 50 committed transitions, oldest first
//! - **Adapters**: owners of machines that wrap Stillwater effects in the
//!   events their workflow expects
//!
//! # Example
//!
//! ```rust
//! use flowstate::builder::{MachineBuilder, TableBuilder};
//! use flowstate::core::context_of;
//! use flowstate::{event_enum, state_enum};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! state_enum! {
//!     pub enum Cart { Empty, Filled, Ordered }
//!     final: [Ordered]
//! }
//!
//! event_enum! {
//!     pub enum CartEvent { Add, Clear, Order }
//! }
//!
//! let table = TableBuilder::new()
//!     .on(Cart::Empty, CartEvent::Add, Cart::Filled)
//!     .on(Cart::Filled, CartEvent::Add, Cart::Filled)
//!     .on(Cart::Filled, CartEvent::Clear, Cart::Empty)
//!     .on(Cart::Filled, CartEvent::Order, Cart::Ordered)
//!     .build()
//!     .unwrap();
//!
//! let mut cart = MachineBuilder::new()
//!     .initial(Cart::Empty)
//!     .table(Arc::new(table))
//!     .build()
//!     .unwrap();
//!
//! assert!(!cart.send(CartEvent::Order));
//! assert!(cart.send_with(CartEvent::Add, context_of(json!({ "items": 1 }))));
//! assert!(cart.send(CartEvent::Order));
//!
//! assert!(cart.is_final());
//! assert_eq!(cart.context()["items"], 1);
//! assert_eq!(cart.history().len(), 2);
//! ```

pub mod adapters;
pub mod builder;
pub mod core;
pub mod engine;
pub mod table;
pub mod validation;
pub mod workflows;

// Re-export commonly used types
pub use core::{Context, Event, Guard, HistoryEntry, SideEffect, State};
pub use engine::{Machine, MachineDefinition, MachineOptions, Rejection};
pub use table::{Transition, TransitionTable};
