//! FormStateStore port - Persistence for in-progress form collections.
//!
//! A host keeps one `FormState` per conversation between turns. The
//! store is keyed by conversation and form name so a conversation can
//! hold at most one active collection per form.

use async_trait::async_trait;

use crate::domain::form::FormState;
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};

/// Errors that can occur during form state storage operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormStateStoreError {
    #[error("No {form} state stored for conversation {conversation_id}")]
    NotFound {
        conversation_id: ConversationId,
        form: String,
    },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<FormStateStoreError> for DomainError {
    fn from(err: FormStateStoreError) -> Self {
        DomainError::new(ErrorCode::StorageError, err.to_string())
    }
}

/// Port for persisting and loading form state between turns.
#[async_trait]
pub trait FormStateStore: Send + Sync {
    /// Save (insert or replace) the state for a conversation.
    async fn save(
        &self,
        conversation_id: &ConversationId,
        state: &FormState,
    ) -> Result<(), FormStateStoreError>;

    /// Load the state for a conversation and form, if one is active.
    async fn load(
        &self,
        conversation_id: &ConversationId,
        form: &str,
    ) -> Result<Option<FormState>, FormStateStoreError>;

    /// Remove the state for a conversation and form.
    ///
    /// # Errors
    /// Returns `FormStateStoreError::NotFound` if nothing was stored.
    async fn remove(
        &self,
        conversation_id: &ConversationId,
        form: &str,
    ) -> Result<FormState, FormStateStoreError>;
}
