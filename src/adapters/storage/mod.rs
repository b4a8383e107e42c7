//! Form state storage adapters.

mod in_memory_form_store;

pub use in_memory_form_store::InMemoryFormStateStore;
