//! Message keys the engine and actions hand to a `Dispatcher`.

/// Sent when a phone candidate is rejected.
pub const WRONG_PHONE: &str = "wrong_phone";

/// Sent when an email candidate is rejected.
pub const WRONG_EMAIL: &str = "wrong_email";

/// Sent once when a completed form is submitted.
pub const SUBMIT: &str = "submit";

/// Sent by the greeting action.
pub const GREET: &str = "greet";

/// Prefix of the per-slot prompt keys (`ask_name`, `ask_email`, ...).
pub const ASK_PREFIX: &str = "ask_";

/// Prompt key asking the user for `slot`.
pub fn ask(slot: &str) -> String {
    format!("{ASK_PREFIX}{slot}")
}
