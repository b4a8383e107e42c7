//! In-Memory Form State Store Adapter
//!
//! Keeps form state in a process-local map. Suitable for tests, the CLI
//! and single-process hosts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::form::FormState;
use crate::domain::foundation::ConversationId;
use crate::ports::{FormStateStore, FormStateStoreError};

type Key = (ConversationId, String);

/// In-memory storage for form state
#[derive(Debug, Clone, Default)]
pub struct InMemoryFormStateStore {
    states: Arc<RwLock<HashMap<Key, FormState>>>,
}

impl InMemoryFormStateStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active collections
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }

    /// Clear all stored state (useful for tests)
    pub async fn clear(&self) {
        self.states.write().await.clear();
    }
}

#[async_trait]
impl FormStateStore for InMemoryFormStateStore {
    async fn save(
        &self,
        conversation_id: &ConversationId,
        state: &FormState,
    ) -> Result<(), FormStateStoreError> {
        let key = (conversation_id.clone(), state.form_name().to_string());
        self.states.write().await.insert(key, state.clone());
        Ok(())
    }

    async fn load(
        &self,
        conversation_id: &ConversationId,
        form: &str,
    ) -> Result<Option<FormState>, FormStateStoreError> {
        let key = (conversation_id.clone(), form.to_string());
        Ok(self.states.read().await.get(&key).cloned())
    }

    async fn remove(
        &self,
        conversation_id: &ConversationId,
        form: &str,
    ) -> Result<FormState, FormStateStoreError> {
        let key = (conversation_id.clone(), form.to_string());
        self.states
            .write()
            .await
            .remove(&key)
            .ok_or_else(|| FormStateStoreError::NotFound {
                conversation_id: conversation_id.clone(),
                form: form.to_string(),
            })
    }
}
