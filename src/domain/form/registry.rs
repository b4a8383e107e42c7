//! Slot registry: the static definition of a form.
//!
//! A registry names the form, lists its required slots in the order they
//! are asked for, and holds each slot's extractors and validator. Forms are
//! configuration data built with `SlotRegistry::builder`, not subclasses.

use std::collections::HashSet;

use super::{ExtractionStrategy, FormError, SlotDefinition, Validator};

/// Immutable, validated set of slot definitions for one form.
#[derive(Debug, Clone)]
pub struct SlotRegistry {
    form_name: String,
    slots: Vec<SlotDefinition>,
}

impl SlotRegistry {
    pub fn builder(form_name: impl Into<String>) -> SlotRegistryBuilder {
        SlotRegistryBuilder {
            form_name: form_name.into(),
            slots: Vec::new(),
        }
    }

    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    /// Required slot names in declared order.
    pub fn required_slots(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(SlotDefinition::name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.slots.iter().any(|s| s.name() == slot)
    }

    /// Full definition of a slot.
    ///
    /// # Errors
    /// Returns `FormError::UnknownSlot` if the form declares no such slot.
    pub fn definition(&self, slot: &str) -> Result<&SlotDefinition, FormError> {
        self.slots
            .iter()
            .find(|s| s.name() == slot)
            .ok_or_else(|| FormError::unknown_slot(&self.form_name, slot))
    }

    pub fn extractors_for(&self, slot: &str) -> Result<&[ExtractionStrategy], FormError> {
        Ok(self.definition(slot)?.extractors())
    }

    pub fn validator_for(&self, slot: &str) -> Result<Option<&Validator>, FormError> {
        Ok(self.definition(slot)?.validator())
    }
}

/// Collects slot definitions and checks them once on `build`.
#[derive(Debug)]
pub struct SlotRegistryBuilder {
    form_name: String,
    slots: Vec<SlotDefinition>,
}

impl SlotRegistryBuilder {
    pub fn slot(mut self, definition: SlotDefinition) -> Self {
        self.slots.push(definition);
        self
    }

    /// Validates and freezes the definition.
    ///
    /// # Errors
    /// - `EmptyForm` if no slot was declared
    /// - `DuplicateSlot` if a slot name repeats
    /// - `NoExtractors` if a slot could never be filled
    pub fn build(self) -> Result<SlotRegistry, FormError> {
        if self.slots.is_empty() {
            return Err(FormError::EmptyForm {
                form: self.form_name,
            });
        }

        let mut seen = HashSet::new();
        for slot in &self.slots {
            if !seen.insert(slot.name()) {
                return Err(FormError::DuplicateSlot {
                    form: self.form_name.clone(),
                    slot: slot.name().to_string(),
                });
            }
            if slot.extractors().is_empty() {
                return Err(FormError::NoExtractors {
                    form: self.form_name.clone(),
                    slot: slot.name().to_string(),
                });
            }
        }

        Ok(SlotRegistry {
            form_name: self.form_name,
            slots: self.slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SlotRegistry {
        SlotRegistry::builder("feedback_form")
            .slot(SlotDefinition::new("name"))
            .slot(SlotDefinition::new("email").with_validator(Validator::email()))
            .slot(SlotDefinition::new("comment"))
            .build()
            .unwrap()
    }

    mod lookup {
        use super::*;

        #[test]
        fn required_slots_keep_declared_order() {
            let registry = sample();
            let slots: Vec<&str> = registry.required_slots().collect();
            assert_eq!(slots, vec!["name", "email", "comment"]);
        }

        #[test]
        fn validator_for_returns_registered_validator() {
            let registry = sample();
            assert_eq!(registry.validator_for("email").unwrap().map(Validator::name), Some("email"));
            assert!(registry.validator_for("name").unwrap().is_none());
        }

        #[test]
        fn extractors_for_returns_declared_strategies() {
            let registry = sample();
            assert_eq!(registry.extractors_for("comment").unwrap().len(), 2);
        }

        #[test]
        fn unknown_slot_fails_fast() {
            let registry = sample();
            assert_eq!(
                registry.extractors_for("age").unwrap_err(),
                FormError::unknown_slot("feedback_form", "age")
            );
            assert!(registry.validator_for("age").is_err());
            assert!(!registry.contains("age"));
        }
    }

    mod build {
        use super::*;

        #[test]
        fn rejects_empty_form() {
            let err = SlotRegistry::builder("empty").build().unwrap_err();
            assert_eq!(
                err,
                FormError::EmptyForm {
                    form: "empty".to_string()
                }
            );
        }

        #[test]
        fn rejects_duplicate_slot_names() {
            let err = SlotRegistry::builder("dup")
                .slot(SlotDefinition::new("name"))
                .slot(SlotDefinition::new("name"))
                .build()
                .unwrap_err();
            assert!(matches!(err, FormError::DuplicateSlot { slot, .. } if slot == "name"));
        }

        #[test]
        fn rejects_slots_without_extractors() {
            let err = SlotRegistry::builder("broken")
                .slot(SlotDefinition::new("name").with_extractors(vec![]))
                .build()
                .unwrap_err();
            assert!(matches!(err, FormError::NoExtractors { .. }));
        }
    }
}
