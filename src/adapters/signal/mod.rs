//! Incoming signal adapters.

mod user_message;

pub use user_message::UserMessage;
