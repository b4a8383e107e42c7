//! Slot definitions and extraction strategies.

use serde::{Deserialize, Serialize};

use super::Validator;
use crate::ports::IncomingSignal;

/// A rule for deriving a candidate slot value from an incoming turn.
///
/// Strategies of a slot are tried in declared order; the first one that
/// yields a non-blank candidate wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", content = "key", rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Read a structured field (an extracted entity) by key.
    StructuredField(String),
    /// Take the whole freeform text of the turn.
    RawText,
}

impl ExtractionStrategy {
    pub fn structured_field(key: impl Into<String>) -> Self {
        Self::StructuredField(key.into())
    }

    /// Applies this strategy to a turn. Blank values count as absent and
    /// surrounding whitespace is trimmed.
    pub fn extract(&self, signal: &dyn IncomingSignal) -> Option<String> {
        let raw = match self {
            Self::StructuredField(key) => signal.structured_field(key),
            Self::RawText => signal.raw_text(),
        }?;

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Declaration of one slot: its name, how to extract it, and how to
/// validate it. Immutable once registered.
#[derive(Debug, Clone)]
pub struct SlotDefinition {
    name: String,
    extractors: Vec<ExtractionStrategy>,
    validator: Option<Validator>,
}

impl SlotDefinition {
    /// A slot filled from the entity named like the slot, falling back to
    /// the raw text of the turn. No validator.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let extractors = vec![
            ExtractionStrategy::StructuredField(name.clone()),
            ExtractionStrategy::RawText,
        ];
        Self {
            name,
            extractors,
            validator: None,
        }
    }

    /// Replaces the extraction strategies.
    pub fn with_extractors(mut self, extractors: Vec<ExtractionStrategy>) -> Self {
        self.extractors = extractors;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extractors(&self) -> &[ExtractionStrategy] {
        &self.extractors
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    /// Runs the extractors in order against a turn.
    pub fn extract(&self, signal: &dyn IncomingSignal) -> Option<String> {
        self.extractors.iter().find_map(|strategy| strategy.extract(signal))
    }
}
