//! Per-session form state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::FormStatus;
use crate::domain::foundation::{FormSessionId, Timestamp};

/// Mutable record of one in-progress collection.
///
/// Only `FormSession` mutates it. A slot appears in `slot_values` only
/// after a candidate for it was accepted, and `pending_slot` always names
/// the first required slot without a value.
///
/// While the collection is open, `status` agrees with `pending_slot`:
/// `Collecting` iff a slot is pending, `Complete` iff none is.
/// `FormSession::resume` restores this against the current form
/// definition before any turn is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FormState {
    session_id: FormSessionId,
    form_name: String,
    slot_values: BTreeMap<String, String>,
    pending_slot: Option<String>,
    status: FormStatus,
    #[serde(default)]
    attempts: BTreeMap<String, u32>,
    started_at: Timestamp,
    updated_at: Timestamp,
}

impl FormState {
    pub(super) fn new(form_name: impl Into<String>, pending_slot: Option<String>) -> Self {
        let now = Timestamp::now();
        Self {
            session_id: FormSessionId::new(),
            form_name: form_name.into(),
            slot_values: BTreeMap::new(),
            pending_slot,
            status: FormStatus::Collecting,
            attempts: BTreeMap::new(),
            started_at: now,
            updated_at: now,
        }
    }

    pub fn session_id(&self) -> &FormSessionId {
        &self.session_id
    }

    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    /// Accepted values by slot name.
    pub fn slot_values(&self) -> &BTreeMap<String, String> {
        &self.slot_values
    }

    pub fn value(&self, slot: &str) -> Option<&str> {
        self.slot_values.get(slot).map(String::as_str)
    }

    pub fn pending_slot(&self) -> Option<&str> {
        self.pending_slot.as_deref()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Candidates received for a slot so far, accepted or not.
    pub fn attempts(&self, slot: &str) -> u32 {
        self.attempts.get(slot).copied().unwrap_or(0)
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub(super) fn record_value(&mut self, slot: &str, value: String) {
        self.slot_values.insert(slot.to_string(), value);
        self.touch();
    }

    pub(super) fn record_attempt(&mut self, slot: &str) -> u32 {
        let count = self.attempts.entry(slot.to_string()).or_insert(0);
        *count += 1;
        let count = *count;
        self.touch();
        count
    }

    pub(super) fn set_pending(&mut self, slot: Option<String>) {
        self.pending_slot = slot;
    }

    pub(super) fn set_status(&mut self, status: FormStatus) {
        self.status = status;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
