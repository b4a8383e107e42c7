//! Message dispatch configuration

use serde::Deserialize;
use std::collections::HashMap;

use super::error::ValidationError;
use crate::adapters::TemplateCatalog;

/// Message texts, merged over the built-in English templates
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Template text by message key (`greet`, `ask_email`, `wrong_phone`, ...)
    #[serde(default)]
    pub templates: HashMap<String, String>,
}

impl DispatchConfig {
    /// Validate dispatch configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some((key, _)) = self.templates.iter().find(|(_, text)| text.trim().is_empty()) {
            return Err(ValidationError::BlankTemplate(key.clone()));
        }
        Ok(())
    }

    /// Built-in templates with the configured overrides applied
    pub fn catalog(&self) -> TemplateCatalog {
        TemplateCatalog::defaults().with_overrides(self.templates.clone())
    }
}
