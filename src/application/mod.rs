//! Application layer - Host-facing action handlers.
//!
//! This layer wires the form engine to ports: it keeps per-conversation
//! state in a `FormStateStore`, prompts through a `Dispatcher` and
//! exposes everything to the host as named `Action`s.

pub mod handlers;
mod registry;

pub use handlers::{FormActionHandler, FormTurn, GreetUserHandler};
pub use registry::ActionRegistry;
