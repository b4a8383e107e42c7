//! Action port - The contract a host runtime uses to run custom actions.
//!
//! Each action exposes a stable, unique name used for routing. Running an
//! action may send messages through the dispatcher and returns explicit
//! directives the host must apply to the conversation.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::actions::Directive;
use crate::domain::form::FormError;
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};

use super::{Dispatcher, FormStateStoreError, IncomingSignal};

/// Errors surfaced to the host when routing or running an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("No action registered under '{0}'")]
    UnknownAction(String),

    #[error("An action named '{0}' is already registered")]
    DuplicateAction(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Storage(#[from] FormStateStoreError),
}

impl ActionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ActionError::UnknownAction(_) => ErrorCode::UnknownAction,
            ActionError::DuplicateAction(_) => ErrorCode::DuplicateAction,
            ActionError::Form(err) => err.code(),
            ActionError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

impl From<ActionError> for DomainError {
    fn from(err: ActionError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Everything an action gets to see about the turn it runs for.
#[derive(Clone, Copy)]
pub struct ActionRequest<'a> {
    pub conversation_id: &'a ConversationId,
    pub signal: &'a dyn IncomingSignal,
}

impl<'a> ActionRequest<'a> {
    pub fn new(conversation_id: &'a ConversationId, signal: &'a dyn IncomingSignal) -> Self {
        Self {
            conversation_id,
            signal,
        }
    }
}

/// Port implemented by every action a host can route to.
#[async_trait]
pub trait Action: Send + Sync {
    /// Stable unique name the host routes on.
    fn name(&self) -> &str;

    /// Runs the action for one turn.
    async fn run(
        &self,
        request: ActionRequest<'_>,
        dispatcher: &dyn Dispatcher,
    ) -> Result<Vec<Directive>, ActionError>;
}
