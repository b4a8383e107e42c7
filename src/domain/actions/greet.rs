//! Greeting: a stateless, revertible one-shot action.

use super::Directive;
use crate::domain::form::messages;
use crate::ports::Dispatcher;

/// Name the host routes the greeting on.
pub const GREET_ACTION: &str = "action_greet";

/// Sends the greeting and asks the host to forget the triggering turn,
/// so greetings never count toward dialogue-policy context.
pub fn greet(dispatcher: &dyn Dispatcher) -> Vec<Directive> {
    dispatcher.send_key(messages::GREET);
    vec![Directive::DiscardLastTurn]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MessageParams;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Dispatcher for Recorder {
        fn send(&self, message_key: &str, _params: &MessageParams) {
            self.0.lock().unwrap().push(message_key.to_string());
        }
    }

    #[test]
    fn greets_then_discards_the_turn() {
        let recorder = Recorder::default();

        let directives = greet(&recorder);

        assert_eq!(*recorder.0.lock().unwrap(), vec!["greet"]);
        assert_eq!(directives, vec![Directive::DiscardLastTurn]);
    }
}
