//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the form engine to a host:
//! - `dispatch` - Message dispatchers (collecting, template rendering)
//! - `signal` - Concrete incoming turn types
//! - `storage` - Form state stores

pub mod dispatch;
pub mod signal;
pub mod storage;

pub use dispatch::{CollectingDispatcher, DispatchedMessage, TemplateCatalog, TemplateDispatcher};
pub use signal::UserMessage;
pub use storage::InMemoryFormStateStore;
