//! Form session: drives one collection from the first prompt to submit.
//!
//! Each call to `ingest` processes exactly one turn for the pending slot:
//! extract a candidate, validate it, then either store it and advance or
//! dispatch the rejection message and stay on the same slot. There is no
//! retry limit; `FormState::attempts` only counts.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{
    messages, ExtractionStrategy, FormError, FormState, FormStatus, SlotRegistry, ValidationOutcome,
};
use crate::domain::actions::Directive;
use crate::domain::foundation::{FormSessionId, StateMachine};
use crate::ports::{Dispatcher, IncomingSignal, MessageParams};

/// What happened to the pending slot during one `ingest` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IngestOutcome {
    /// A candidate was accepted and stored.
    Accepted { slot: String, value: String },
    /// A candidate was refused; `message_key` was dispatched.
    Rejected { slot: String, message_key: String },
    /// No extractor produced a candidate; nothing changed.
    NoCandidate { slot: String },
}

impl IngestOutcome {
    pub fn slot(&self) -> &str {
        match self {
            IngestOutcome::Accepted { slot, .. }
            | IngestOutcome::Rejected { slot, .. }
            | IngestOutcome::NoCandidate { slot } => slot,
        }
    }
}

/// Result of the terminal submit step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResult {
    pub session_id: FormSessionId,
    /// Every accepted value, by slot name.
    pub values: BTreeMap<String, String>,
    /// Directives for the host. Empty for plain forms; downstream side
    /// effects (e.g. persisting the submission) hook in here.
    pub directives: Vec<Directive>,
}

/// Driver for one in-progress collection.
#[derive(Debug, Clone)]
pub struct FormSession {
    registry: Arc<SlotRegistry>,
    state: FormState,
}

impl FormSession {
    /// Starts a new collection on the first required slot.
    pub fn start(registry: Arc<SlotRegistry>) -> Self {
        let first = registry.required_slots().next().map(str::to_string);
        let state = FormState::new(registry.form_name(), first);

        tracing::info!(
            session_id = %state.session_id(),
            form = %registry.form_name(),
            "Form session started"
        );

        Self { registry, state }
    }

    /// Rehydrates a persisted state against its form definition.
    ///
    /// The pending slot is recomputed from the stored values, so a state
    /// saved by an older definition still points at the right slot. An
    /// open status is realigned with it: a `Complete` state that now has
    /// an unfilled slot goes back to `Collecting`, and a `Collecting`
    /// state with nothing left to ask becomes `Complete`. This is a
    /// repair of stored data, not a lifecycle transition.
    ///
    /// # Errors
    /// - `FormMismatch` if the state was produced by another form
    /// - `UnknownSlot` if the state holds a value the form does not declare
    pub fn resume(registry: Arc<SlotRegistry>, mut state: FormState) -> Result<Self, FormError> {
        if state.form_name() != registry.form_name() {
            return Err(FormError::FormMismatch {
                expected: registry.form_name().to_string(),
                found: state.form_name().to_string(),
            });
        }
        if let Some(slot) = state.slot_values().keys().find(|s| !registry.contains(s)) {
            return Err(FormError::unknown_slot(registry.form_name(), slot.as_str()));
        }

        let pending = first_unfilled(&registry, &state);
        let realigned = match (state.status(), pending.is_some()) {
            (FormStatus::Complete, true) => Some(FormStatus::Collecting),
            (FormStatus::Collecting, false) => Some(FormStatus::Complete),
            _ => None,
        };
        if let Some(status) = realigned {
            tracing::warn!(
                session_id = %state.session_id(),
                form = %registry.form_name(),
                from = %state.status(),
                to = %status,
                "Stored form status realigned with its definition"
            );
            state.set_status(status);
        }
        state.set_pending(pending);

        Ok(Self { registry, state })
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    pub fn session_id(&self) -> &FormSessionId {
        self.state.session_id()
    }

    pub fn status(&self) -> FormStatus {
        self.state.status()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn into_state(self) -> FormState {
        self.state
    }

    /// First required slot, in declared order, without an accepted value.
    pub fn next_pending_slot(&self) -> Option<&str> {
        self.registry
            .required_slots()
            .find(|slot| self.state.value(slot).is_none())
    }

    /// True once every required slot holds an accepted value.
    pub fn is_complete(&self) -> bool {
        self.next_pending_slot().is_none()
    }

    /// Accepted value of a slot, if any.
    ///
    /// # Errors
    /// Returns `FormError::UnknownSlot` for names the form does not declare.
    pub fn value(&self, slot: &str) -> Result<Option<&str>, FormError> {
        if !self.registry.contains(slot) {
            return Err(FormError::unknown_slot(self.registry.form_name(), slot));
        }
        Ok(self.state.value(slot))
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        self.state.slot_values()
    }

    /// Processes one incoming turn for the pending slot.
    ///
    /// # Errors
    /// Returns `FormError::SessionClosed` unless the session is collecting.
    pub fn ingest(
        &mut self,
        signal: &dyn IncomingSignal,
        dispatcher: &dyn Dispatcher,
    ) -> Result<IngestOutcome, FormError> {
        let status = self.status();
        let slot = match self.state.pending_slot() {
            Some(slot) if status.accepts_input() => slot.to_string(),
            _ => return Err(FormError::SessionClosed { status }),
        };

        let definition = self.registry.definition(&slot)?;
        let attempt = self.state.record_attempt(&slot);

        let Some(candidate) = definition.extract(signal) else {
            tracing::debug!(
                session_id = %self.state.session_id(),
                slot = %slot,
                attempt,
                "No candidate extracted"
            );
            return Ok(IngestOutcome::NoCandidate { slot });
        };

        self.apply(slot, candidate, attempt, dispatcher)
    }

    /// Fills unfilled slots from the structured fields of the turn that
    /// activated the form, in declared order.
    ///
    /// Only `StructuredField` strategies are consulted; raw text belongs to
    /// whatever slot is asked for next. Each candidate goes through the
    /// slot's validator, so a rejection dispatches its message here too.
    ///
    /// # Errors
    /// Returns `FormError::SessionClosed` unless the session is collecting.
    pub fn prefill(
        &mut self,
        signal: &dyn IncomingSignal,
        dispatcher: &dyn Dispatcher,
    ) -> Result<Vec<IngestOutcome>, FormError> {
        let status = self.status();
        if !status.accepts_input() {
            return Err(FormError::SessionClosed { status });
        }

        let candidates: Vec<(String, String)> = self
            .registry
            .required_slots()
            .filter(|slot| self.state.value(slot).is_none())
            .filter_map(|slot| {
                let definition = self.registry.definition(slot).ok()?;
                definition
                    .extractors()
                    .iter()
                    .filter(|strategy| matches!(strategy, ExtractionStrategy::StructuredField(_)))
                    .find_map(|strategy| strategy.extract(signal))
                    .map(|candidate| (slot.to_string(), candidate))
            })
            .collect();

        let mut outcomes = Vec::with_capacity(candidates.len());
        for (slot, candidate) in candidates {
            let attempt = self.state.record_attempt(&slot);
            outcomes.push(self.apply(slot, candidate, attempt, dispatcher)?);
        }
        Ok(outcomes)
    }

    /// Runs the terminal submit step: dispatches the confirmation message
    /// once and closes the session.
    ///
    /// # Errors
    /// - `NotComplete` while a required slot is unfilled
    /// - `SessionClosed` if already submitted or cancelled
    pub fn submit(&mut self, dispatcher: &dyn Dispatcher) -> Result<SubmitResult, FormError> {
        match self.status() {
            FormStatus::Complete | FormStatus::Collecting => {}
            status => return Err(FormError::SessionClosed { status }),
        }
        if let Some(pending) = self.next_pending_slot() {
            return Err(FormError::NotComplete {
                pending: pending.to_string(),
            });
        }

        let next = self.status().transition_to(FormStatus::Submitted)?;
        self.state.set_status(next);

        dispatcher.send(messages::SUBMIT, self.state.slot_values());

        tracing::info!(
            session_id = %self.state.session_id(),
            form = %self.registry.form_name(),
            "Form submitted"
        );

        Ok(SubmitResult {
            session_id: *self.state.session_id(),
            values: self.state.slot_values().clone(),
            directives: Vec::new(),
        })
    }

    /// Applies an external cancellation signal.
    ///
    /// # Errors
    /// Returns `FormError::SessionClosed` if already submitted or cancelled.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        let status = self.status();
        if status.is_terminal() {
            return Err(FormError::SessionClosed { status });
        }

        let next = status.transition_to(FormStatus::Cancelled)?;
        self.state.set_status(next);

        tracing::info!(
            session_id = %self.state.session_id(),
            form = %self.registry.form_name(),
            filled = self.state.slot_values().len(),
            "Form session cancelled"
        );
        Ok(())
    }

    /// Validates a candidate for `slot`, then stores it or dispatches the
    /// rejection message.
    fn apply(
        &mut self,
        slot: String,
        candidate: String,
        attempt: u32,
        dispatcher: &dyn Dispatcher,
    ) -> Result<IngestOutcome, FormError> {
        let outcome = match self.registry.validator_for(&slot)? {
            Some(validator) => validator.validate(&candidate),
            None => ValidationOutcome::Accepted(candidate.clone()),
        };

        match outcome {
            ValidationOutcome::Accepted(value) => {
                self.accept(&slot, value.clone())?;
                tracing::debug!(
                    session_id = %self.state.session_id(),
                    slot = %slot,
                    attempt,
                    "Slot value accepted"
                );
                Ok(IngestOutcome::Accepted { slot, value })
            }
            ValidationOutcome::Rejected(message_key) => {
                let mut params = MessageParams::new();
                params.insert("slot".to_string(), slot.clone());
                params.insert("value".to_string(), candidate);
                dispatcher.send(&message_key, &params);

                tracing::debug!(
                    session_id = %self.state.session_id(),
                    slot = %slot,
                    attempt,
                    message_key = %message_key,
                    "Slot value rejected"
                );
                Ok(IngestOutcome::Rejected { slot, message_key })
            }
        }
    }

    fn accept(&mut self, slot: &str, value: String) -> Result<(), FormError> {
        self.state.record_value(slot, value);

        let pending = first_unfilled(&self.registry, &self.state);
        let target = if pending.is_some() {
            FormStatus::Collecting
        } else {
            FormStatus::Complete
        };
        let next = self.status().transition_to(target)?;

        self.state.set_pending(pending);
        self.state.set_status(next);
        Ok(())
    }
}

fn first_unfilled(registry: &SlotRegistry, state: &FormState) -> Option<String> {
    registry
        .required_slots()
        .find(|slot| state.value(slot).is_none())
        .map(str::to_string)
}
