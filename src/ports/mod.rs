//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the form engine and the host runtime. Adapters implement these ports.
//!
//! - `Dispatcher` - Outbound message delivery, keyed by message name
//! - `IncomingSignal` - Read-only view of a user turn for slot extraction
//! - `Action` - Runtime action-registration contract (name + run)
//! - `FormStateStore` - Per-conversation persistence of form state

mod action;
mod dispatcher;
mod form_state_store;
mod incoming_signal;

pub use action::{Action, ActionError, ActionRequest};
pub use dispatcher::{Dispatcher, MessageParams};
pub use form_state_store::{FormStateStore, FormStateStoreError};
pub use incoming_signal::IncomingSignal;
