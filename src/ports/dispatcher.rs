//! Dispatcher port - Interface for outbound user-facing messages.
//!
//! The engine never builds message bodies. It picks a message key
//! (`"wrong_phone"`, `"submit"`, ...) plus a few parameters and hands
//! them to a dispatcher, which owns rendering and delivery.

use std::collections::BTreeMap;

/// Named parameters available to the renderer of a message.
pub type MessageParams = BTreeMap<String, String>;

/// Port for sending messages back to the user.
///
/// Calls are synchronous and expected to return promptly; adapters that
/// deliver over a network should buffer and flush outside the engine.
pub trait Dispatcher: Send + Sync {
    /// Sends the message identified by `message_key`.
    fn send(&self, message_key: &str, params: &MessageParams);

    /// Sends a message that takes no parameters.
    fn send_key(&self, message_key: &str) {
        self.send(message_key, &MessageParams::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<(String, MessageParams)>>,
    }

    impl Dispatcher for Recorder {
        fn send(&self, message_key: &str, params: &MessageParams) {
            self.sent
                .lock()
                .unwrap()
                .push((message_key.to_string(), params.clone()));
        }
    }

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn Dispatcher) {}

    #[test]
    fn send_key_forwards_with_empty_params() {
        let recorder = Recorder::default();
        recorder.send_key("greet");

        let sent = recorder.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "greet");
        assert!(sent[0].1.is_empty());
    }
}
