//! FormActionHandler - Hosts a form for many conversations.
//!
//! Each conversation gets its own `FormState`, persisted through a
//! `FormStateStore` between turns. The first turn opens the form, fills
//! whatever slots its structured fields carry and asks for the first
//! slot still missing; later turns feed the pending slot, re-prompt while
//! collecting and submit once complete. Turns for one conversation must
//! not run concurrently; the host serializes them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::actions::Directive;
use crate::domain::foundation::{ConversationId, FormSessionId};
use crate::domain::form::{
    messages, FormError, FormSession, IngestOutcome, SlotRegistry, SubmitResult,
};
use crate::ports::{
    Action, ActionError, ActionRequest, Dispatcher, FormStateStore, IncomingSignal, MessageParams,
};

/// What one turn did to a conversation's form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTurn {
    /// The form was opened, slots were prefilled from the turn's
    /// structured fields, and the first pending slot requested.
    Started {
        session_id: FormSessionId,
        prefilled: Vec<IngestOutcome>,
        prompted_slot: String,
    },
    /// The turn was processed and the form still needs `pending_slot`.
    Collecting {
        outcome: IngestOutcome,
        pending_slot: String,
    },
    /// The form completed and was submitted; its state is gone.
    Submitted {
        outcome: Option<IngestOutcome>,
        result: SubmitResult,
    },
}

impl FormTurn {
    /// Directives the host must apply for this turn.
    pub fn directives(&self) -> Vec<Directive> {
        match self {
            FormTurn::Submitted { result, .. } => result.directives.clone(),
            _ => Vec::new(),
        }
    }
}

/// Handler running one form definition across conversations.
pub struct FormActionHandler {
    form: Arc<SlotRegistry>,
    store: Arc<dyn FormStateStore>,
}

impl FormActionHandler {
    pub fn new(form: Arc<SlotRegistry>, store: Arc<dyn FormStateStore>) -> Self {
        Self { form, store }
    }

    pub fn form(&self) -> &SlotRegistry {
        &self.form
    }

    /// Processes one turn of `conversation_id`.
    pub async fn handle(
        &self,
        conversation_id: &ConversationId,
        signal: &dyn IncomingSignal,
        dispatcher: &dyn Dispatcher,
    ) -> Result<FormTurn, ActionError> {
        let form_name = self.form.form_name();

        let Some(state) = self.store.load(conversation_id, form_name).await? else {
            let mut session = FormSession::start(Arc::clone(&self.form));
            let prefilled = session.prefill(signal, dispatcher)?;

            tracing::info!(
                conversation_id = %conversation_id,
                form = %form_name,
                prefilled = prefilled.len(),
                "Form activated"
            );

            if session.is_complete() {
                let result = session.submit(dispatcher)?;
                return Ok(FormTurn::Submitted {
                    outcome: None,
                    result,
                });
            }

            let prompted_slot = Self::prompt(&session, dispatcher).unwrap_or_default();
            self.store.save(conversation_id, session.state()).await?;

            return Ok(FormTurn::Started {
                session_id: *session.session_id(),
                prefilled,
                prompted_slot,
            });
        };

        let mut session = FormSession::resume(Arc::clone(&self.form), state)?;

        // A state saved complete (submit interrupted) goes straight to submit.
        let outcome = if session.status().accepts_input() {
            Some(session.ingest(signal, dispatcher)?)
        } else {
            None
        };

        if session.is_complete() {
            let result = session.submit(dispatcher)?;
            self.store.remove(conversation_id, form_name).await?;
            return Ok(FormTurn::Submitted { outcome, result });
        }

        let Some(outcome) = outcome else {
            return Err(FormError::SessionClosed {
                status: session.status(),
            }
            .into());
        };

        let pending_slot = Self::prompt(&session, dispatcher).unwrap_or_default();
        self.store.save(conversation_id, session.state()).await?;

        Ok(FormTurn::Collecting {
            outcome,
            pending_slot,
        })
    }

    /// Applies the external cancellation signal to a conversation's form.
    ///
    /// Returns `true` if an active collection was discarded.
    pub async fn cancel(&self, conversation_id: &ConversationId) -> Result<bool, ActionError> {
        let form_name = self.form.form_name();
        let Some(state) = self.store.load(conversation_id, form_name).await? else {
            return Ok(false);
        };

        let mut session = FormSession::resume(Arc::clone(&self.form), state)?;
        session.cancel()?;
        self.store.remove(conversation_id, form_name).await?;

        tracing::info!(
            conversation_id = %conversation_id,
            form = %form_name,
            "Form deactivated"
        );
        Ok(true)
    }

    /// Asks for the pending slot, returning its name.
    fn prompt(session: &FormSession, dispatcher: &dyn Dispatcher) -> Option<String> {
        let slot = session.next_pending_slot()?;
        let mut params = MessageParams::new();
        params.insert("slot".to_string(), slot.to_string());
        dispatcher.send(&messages::ask(slot), &params);
        Some(slot.to_string())
    }
}

#[async_trait]
impl Action for FormActionHandler {
    fn name(&self) -> &str {
        self.form.form_name()
    }

    async fn run(
        &self,
        request: ActionRequest<'_>,
        dispatcher: &dyn Dispatcher,
    ) -> Result<Vec<Directive>, ActionError> {
        let turn = self
            .handle(request.conversation_id, request.signal, dispatcher)
            .await?;
        Ok(turn.directives())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{CollectingDispatcher, InMemoryFormStateStore, UserMessage};
    use crate::domain::form::{contact_form, FormStatus, SlotDefinition};

    struct Fixture {
        handler: FormActionHandler,
        store: Arc<InMemoryFormStateStore>,
        dispatcher: CollectingDispatcher,
        conversation: ConversationId,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(InMemoryFormStateStore::new());
            let handler = FormActionHandler::new(
                Arc::new(contact_form().unwrap()),
                store.clone() as Arc<dyn FormStateStore>,
            );
            Self {
                handler,
                store,
                dispatcher: CollectingDispatcher::new(),
                conversation: ConversationId::new("alice").unwrap(),
            }
        }

        async fn say(&self, text: &str) -> FormTurn {
            self.send(UserMessage::text(text)).await
        }

        async fn send(&self, message: UserMessage) -> FormTurn {
            self.handler
                .handle(&self.conversation, &message, &self.dispatcher)
                .await
                .unwrap()
        }
    }

    #[tokio::test]
    async fn first_turn_opens_form_and_asks_first_slot() {
        let fx = Fixture::new();

        let turn = fx.say("I want to contact you").await;

        assert!(matches!(turn, FormTurn::Started { ref prompted_slot, .. } if prompted_slot == "name"));
        assert_eq!(fx.dispatcher.keys(), vec!["ask_name"]);
        assert_eq!(fx.store.len().await, 1);
    }

    #[tokio::test]
    async fn first_turn_entities_fill_slots_before_prompting() {
        let fx = Fixture::new();
        let message = UserMessage::text("I'm Alice, mail me at a@b.com")
            .with_entity("name", "Alice")
            .with_entity("email", "a@b.com");

        let turn = fx.send(message).await;

        match turn {
            FormTurn::Started {
                prefilled,
                prompted_slot,
                ..
            } => {
                assert_eq!(prefilled.len(), 2);
                assert_eq!(prompted_slot, "phone");
            }
            other => panic!("expected activation, got {:?}", other),
        }
        assert_eq!(fx.dispatcher.keys(), vec!["ask_phone"]);
        let state = fx
            .store
            .load(&fx.conversation, "contact_form")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(state.value("name"), Some("Alice"));
        assert_eq!(state.value("email"), Some("a@b.com"));
        assert_eq!(state.pending_slot(), Some("phone"));
    }

    #[tokio::test]
    async fn first_turn_invalid_entity_is_rejected_then_first_slot_asked() {
        let fx = Fixture::new();

        fx.send(UserMessage::text("contact").with_entity("email", "not-an-email"))
            .await;

        assert_eq!(fx.dispatcher.keys(), vec!["wrong_email", "ask_name"]);
        let state = fx
            .store
            .load(&fx.conversation, "contact_form")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(state.value("email"), None);
    }

    #[tokio::test]
    async fn first_turn_with_every_entity_submits_at_once() {
        let fx = Fixture::new();
        let message = UserMessage::default()
            .with_entity("name", "Alice")
            .with_entity("email", "a@b.com")
            .with_entity("phone", "5551234567")
            .with_entity("message", "hello");

        let turn = fx.send(message).await;

        assert!(matches!(turn, FormTurn::Submitted { outcome: None, .. }));
        assert_eq!(fx.dispatcher.keys(), vec!["submit"]);
        assert!(fx.store.is_empty().await);
    }

    #[tokio::test]
    async fn accepted_value_prompts_next_slot() {
        let fx = Fixture::new();
        fx.say("hi").await;
        fx.dispatcher.drain();

        let turn = fx.say("Alice").await;

        assert!(matches!(turn, FormTurn::Collecting { ref pending_slot, .. } if pending_slot == "email"));
        assert_eq!(fx.dispatcher.keys(), vec!["ask_email"]);
    }

    #[tokio::test]
    async fn rejection_sends_reason_then_reprompts() {
        let fx = Fixture::new();
        fx.say("hi").await;
        fx.say("Alice").await;
        fx.dispatcher.drain();

        let turn = fx.say("alice-at-example").await;

        assert!(matches!(
            turn,
            FormTurn::Collecting { outcome: IngestOutcome::Rejected { .. }, ref pending_slot } if pending_slot == "email"
        ));
        assert_eq!(fx.dispatcher.keys(), vec!["wrong_email", "ask_email"]);
    }

    #[tokio::test]
    async fn completing_the_form_submits_and_clears_state() {
        let fx = Fixture::new();
        fx.say("hi").await;
        for text in ["Alice", "alice@x.com", "5551234567"] {
            fx.say(text).await;
        }
        fx.dispatcher.drain();

        let turn = fx.say("hello").await;

        match turn {
            FormTurn::Submitted { result, .. } => {
                assert_eq!(result.values.len(), 4);
                assert!(result.directives.is_empty());
            }
            other => panic!("expected submission, got {:?}", other),
        }
        assert_eq!(fx.dispatcher.keys(), vec!["submit"]);
        assert!(fx.store.is_empty().await);
    }

    #[tokio::test]
    async fn cancel_discards_active_collection() {
        let fx = Fixture::new();
        fx.say("hi").await;
        fx.say("Alice").await;

        assert!(fx.handler.cancel(&fx.conversation).await.unwrap());
        assert!(fx.store.is_empty().await);
        assert!(!fx.handler.cancel(&fx.conversation).await.unwrap());
    }

    #[tokio::test]
    async fn resumes_stored_complete_state_by_submitting() {
        let fx = Fixture::new();
        let mut session = FormSession::start(Arc::new(contact_form().unwrap()));
        for text in ["Alice", "alice@x.com", "5551234567", "hello"] {
            session.ingest(&UserMessage::text(text), &fx.dispatcher).unwrap();
        }
        assert_eq!(session.status(), FormStatus::Complete);
        fx.store.save(&fx.conversation, session.state()).await.unwrap();

        let turn = fx.say("anything").await;

        assert!(matches!(turn, FormTurn::Submitted { outcome: None, .. }));
    }

    #[tokio::test]
    async fn stored_complete_state_reopens_when_form_gains_a_slot() {
        let fx = Fixture::new();
        let narrow = SlotRegistry::builder("contact_form")
            .slot(SlotDefinition::new("name"))
            .build()
            .unwrap();
        let mut session = FormSession::start(Arc::new(narrow));
        session.ingest(&UserMessage::text("Alice"), &fx.dispatcher).unwrap();
        assert_eq!(session.status(), FormStatus::Complete);
        fx.store.save(&fx.conversation, session.state()).await.unwrap();

        let turn = fx.say("alice@x.com").await;

        assert!(matches!(
            turn,
            FormTurn::Collecting { outcome: IngestOutcome::Accepted { .. }, ref pending_slot } if pending_slot == "phone"
        ));
        assert_eq!(fx.dispatcher.keys(), vec!["ask_phone"]);
        assert!(!fx.dispatcher.has_message("submit"));
    }

    #[tokio::test]
    async fn foreign_state_surfaces_form_error() {
        let fx = Fixture::new();
        let other = SlotRegistry::builder("contact_form")
            .slot(SlotDefinition::new("age"))
            .build()
            .unwrap();
        let mut session = FormSession::start(Arc::new(other));
        session.ingest(&UserMessage::text("42"), &fx.dispatcher).unwrap();
        fx.store.save(&fx.conversation, session.state()).await.unwrap();

        let err = fx
            .handler
            .handle(&fx.conversation, &UserMessage::text("x"), &fx.dispatcher)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ActionError::Form(FormError::unknown_slot("contact_form", "age"))
        );
    }
}
