//! Slot validators.
//!
//! A validator is a pure function from a raw candidate to a
//! `ValidationOutcome`. Validators never touch form state; the session
//! applies the outcome.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::messages;

/// Result of validating one raw candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// The candidate is acceptable; carries the normalized value to store.
    Accepted(String),
    /// The candidate is refused; carries the message key to dispatch.
    Rejected(String),
}

impl ValidationOutcome {
    pub fn accepted(value: impl Into<String>) -> Self {
        Self::Accepted(value.into())
    }

    pub fn rejected(message_key: impl Into<String>) -> Self {
        Self::Rejected(message_key.into())
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

type ValidateFn = dyn Fn(&str) -> ValidationOutcome + Send + Sync;

/// A named, shareable validation function attached to a slot.
#[derive(Clone)]
pub struct Validator {
    name: &'static str,
    check: Arc<ValidateFn>,
}

impl Validator {
    /// Wraps a function (or capturing closure) as a validator.
    pub fn new<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&str) -> ValidationOutcome + Send + Sync + 'static,
    {
        Self {
            name,
            check: Arc::new(check),
        }
    }

    /// Accepts exactly ten ASCII digits.
    pub fn phone() -> Self {
        Self::new("phone", validate_phone)
    }

    /// Accepts `local@domain.tld` shaped strings.
    pub fn email() -> Self {
        Self::new("email", validate_email)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn validate(&self, candidate: &str) -> ValidationOutcome {
        (self.check)(candidate)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").field("name", &self.name).finish()
    }
}

/// Number of digits a phone number must have.
pub const PHONE_DIGITS: usize = 10;

/// Accepts iff the candidate is exactly ten decimal digits.
pub fn validate_phone(candidate: &str) -> ValidationOutcome {
    if candidate.len() == PHONE_DIGITS && candidate.bytes().all(|b| b.is_ascii_digit()) {
        ValidationOutcome::accepted(candidate)
    } else {
        ValidationOutcome::rejected(messages::WRONG_PHONE)
    }
}

// Anchored at the start only: trailing text after the first
// `local@domain.tld` shape is tolerated.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("email pattern must compile"));

/// Accepts minimal `local@domain.tld` shaped strings. Not RFC 5322.
pub fn validate_email(candidate: &str) -> ValidationOutcome {
    if EMAIL_SHAPE.is_match(candidate) {
        ValidationOutcome::accepted(candidate)
    } else {
        ValidationOutcome::rejected(messages::WRONG_EMAIL)
    }
}
