//! Template-rendering dispatcher.
//!
//! Turns message keys into text through a `TemplateCatalog` and writes one
//! line per message. `{param}` placeholders are replaced by dispatch
//! params; unknown placeholders are left as they are.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

use crate::domain::form::messages;
use crate::ports::{Dispatcher, MessageParams};

/// Message texts by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCatalog {
    templates: HashMap<String, String>,
}

impl TemplateCatalog {
    /// English texts for every key the contact form and greeting use.
    pub fn defaults() -> Self {
        let templates = [
            (messages::GREET, "Hi! I can pass a message on to the team. Just ask."),
            (messages::ask("name").as_str(), "What is your name?"),
            (messages::ask("email").as_str(), "What is your email address?"),
            (messages::ask("phone").as_str(), "What is your phone number?"),
            (messages::ask("message").as_str(), "What message would you like to leave?"),
            (messages::WRONG_EMAIL, "That doesn't look like an email address. Please try again."),
            (
                messages::WRONG_PHONE,
                "A phone number needs exactly 10 digits. Please try again.",
            ),
            (messages::SUBMIT, "Thanks {name}, your message has been sent!"),
        ]
        .into_iter()
        .map(|(key, text)| (key.to_string(), text.to_string()))
        .collect();

        Self { templates }
    }

    /// Adds or replaces texts.
    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (String, String)>) -> Self {
        self.templates.extend(overrides);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Renders a key. Keys without a template render as `[key]`.
    pub fn render(&self, key: &str, params: &MessageParams) -> String {
        let Some(template) = self.get(key) else {
            tracing::warn!(message_key = %key, "No template for message key");
            return format!("[{key}]");
        };

        params.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Dispatcher that renders each message and writes it as a line.
pub struct TemplateDispatcher<W: Write + Send> {
    catalog: TemplateCatalog,
    out: Mutex<W>,
}

impl<W: Write + Send> TemplateDispatcher<W> {
    pub fn new(catalog: TemplateCatalog, out: W) -> Self {
        Self {
            catalog,
            out: Mutex::new(out),
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Dispatcher for TemplateDispatcher<W> {
    fn send(&self, message_key: &str, params: &MessageParams) {
        let text = self.catalog.render(message_key, params);
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            tracing::warn!(message_key = %message_key, "Failed to write message: {}", e);
        }
    }
}
