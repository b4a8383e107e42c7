//! A plain user turn: optional text plus extracted entities.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ports::IncomingSignal;

/// An incoming user message as delivered by an NLU pipeline or typed at
/// a prompt.
///
/// Deserializes from `{"text": "...", "entities": {"email": "..."}}`;
/// both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub entities: HashMap<String, String>,
}

impl UserMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            entities: HashMap::new(),
        }
    }

    pub fn with_entity(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entities.insert(key.into(), value.into());
        self
    }

    /// Reads one input line: a JSON object is parsed as a full message,
    /// anything else is taken as plain text.
    ///
    /// # Errors
    /// Returns the JSON error if the line looks like an object but is not
    /// a valid message.
    pub fn parse_line(line: &str) -> Result<Self, serde_json::Error> {
        let trimmed = line.trim();
        if trimmed.starts_with('{') {
            serde_json::from_str(trimmed)
        } else {
            Ok(Self::text(trimmed))
        }
    }
}

impl IncomingSignal for UserMessage {
    fn structured_field(&self, key: &str) -> Option<&str> {
        self.entities.get(key).map(String::as_str)
    }

    fn raw_text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
