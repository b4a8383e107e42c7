//! GreetUserHandler - The revertible greeting action.

use async_trait::async_trait;

use crate::domain::actions::{greet, Directive, GREET_ACTION};
use crate::ports::{Action, ActionError, ActionRequest, Dispatcher};

/// Sends the greeting and asks the host to drop the triggering turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetUserHandler;

impl GreetUserHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Action for GreetUserHandler {
    fn name(&self) -> &str {
        GREET_ACTION
    }

    async fn run(
        &self,
        request: ActionRequest<'_>,
        dispatcher: &dyn Dispatcher,
    ) -> Result<Vec<Directive>, ActionError> {
        tracing::debug!(conversation_id = %request.conversation_id, "Greeting user");
        Ok(greet(dispatcher))
    }
}
