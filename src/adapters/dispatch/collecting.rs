//! In-memory dispatcher that records every message.
//!
//! Provides deterministic capture of outbound messages for tests and for
//! hosts that render a whole turn's replies at once.
//!
//! # Panics
//!
//! Uses `.expect()` on lock operations, which panics if a lock is
//! poisoned. Hosts that cannot tolerate that should use their own adapter.

use serde::Serialize;
use std::sync::RwLock;

use crate::ports::{Dispatcher, MessageParams};

/// A message as handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchedMessage {
    pub key: String,
    pub params: MessageParams,
}

/// Dispatcher that keeps messages in memory until drained.
///
/// # Example
///
/// ```ignore
/// let dispatcher = CollectingDispatcher::new();
/// session.ingest(&turn, &dispatcher)?;
/// assert!(dispatcher.has_message("wrong_phone"));
/// ```
#[derive(Debug, Default)]
pub struct CollectingDispatcher {
    messages: RwLock<Vec<DispatchedMessage>>,
}

impl CollectingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected messages.
    pub fn messages(&self) -> Vec<DispatchedMessage> {
        self.messages
            .read()
            .expect("CollectingDispatcher: messages lock poisoned")
            .clone()
    }

    /// Returns the collected message keys in dispatch order.
    pub fn keys(&self) -> Vec<String> {
        self.messages().into_iter().map(|m| m.key).collect()
    }

    /// Checks if a message with the given key was dispatched.
    pub fn has_message(&self, key: &str) -> bool {
        self.count_of(key) > 0
    }

    /// Counts messages with the given key.
    pub fn count_of(&self, key: &str) -> usize {
        self.messages
            .read()
            .expect("CollectingDispatcher: messages lock poisoned")
            .iter()
            .filter(|m| m.key == key)
            .count()
    }

    /// Removes and returns everything collected so far.
    pub fn drain(&self) -> Vec<DispatchedMessage> {
        std::mem::take(
            &mut *self
                .messages
                .write()
                .expect("CollectingDispatcher: messages write lock poisoned"),
        )
    }
}

impl Dispatcher for CollectingDispatcher {
    fn send(&self, message_key: &str, params: &MessageParams) {
        self.messages
            .write()
            .expect("CollectingDispatcher: messages write lock poisoned")
            .push(DispatchedMessage {
                key: message_key.to_string(),
                params: params.clone(),
            });
    }
}
