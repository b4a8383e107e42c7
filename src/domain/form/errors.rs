//! Form engine error types.
//!
//! Only programming and lifecycle errors live here. A rejected candidate
//! or a turn with nothing to extract is a normal `IngestOutcome`, not an
//! error.

use thiserror::Error;

use super::FormStatus;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Form '{form}' has no slot named '{slot}'")]
    UnknownSlot { form: String, slot: String },

    #[error("Slot '{slot}' is declared more than once in form '{form}'")]
    DuplicateSlot { form: String, slot: String },

    #[error("Slot '{slot}' in form '{form}' has no extraction strategies")]
    NoExtractors { form: String, slot: String },

    #[error("Form '{form}' declares no required slots")]
    EmptyForm { form: String },

    #[error("State belongs to form '{found}', not '{expected}'")]
    FormMismatch { expected: String, found: String },

    #[error("Form session no longer accepts this operation (status: {status})")]
    SessionClosed { status: FormStatus },

    #[error("Form cannot be submitted while slot '{pending}' is unfilled")]
    NotComplete { pending: String },

    #[error(transparent)]
    InvalidTransition(#[from] ValidationError),
}

impl FormError {
    pub fn unknown_slot(form: impl Into<String>, slot: impl Into<String>) -> Self {
        FormError::UnknownSlot {
            form: form.into(),
            slot: slot.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            FormError::UnknownSlot { .. } => ErrorCode::UnknownSlot,
            FormError::DuplicateSlot { .. } => ErrorCode::DuplicateSlot,
            FormError::NoExtractors { .. }
            | FormError::EmptyForm { .. }
            | FormError::FormMismatch { .. } => ErrorCode::InvalidFormDefinition,
            FormError::SessionClosed { .. } => ErrorCode::SessionClosed,
            FormError::NotComplete { .. } => ErrorCode::FormIncomplete,
            FormError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
        }
    }
}

impl From<FormError> for DomainError {
    fn from(err: FormError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            FormError::UnknownSlot { form, slot }
            | FormError::DuplicateSlot { form, slot }
            | FormError::NoExtractors { form, slot } => {
                domain.with_detail("form", form).with_detail("slot", slot)
            }
            FormError::SessionClosed { status } => domain.with_detail("status", status.to_string()),
            _ => domain,
        }
    }
}
