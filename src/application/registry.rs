//! ActionRegistry - Routes host action calls by name.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::actions::Directive;
use crate::ports::{Action, ActionError, ActionRequest, Dispatcher};

/// Set of actions a host can run, keyed by their unique names.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action under its own name.
    ///
    /// # Errors
    /// Returns `ActionError::DuplicateAction` if the name is taken.
    pub fn register(&mut self, action: Arc<dyn Action>) -> Result<(), ActionError> {
        let name = action.name().to_string();
        if self.actions.contains_key(&name) {
            return Err(ActionError::DuplicateAction(name));
        }
        tracing::debug!(action = %name, "Action registered");
        self.actions.insert(name, action);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Runs the action registered under `name`.
    pub async fn run(
        &self,
        name: &str,
        request: ActionRequest<'_>,
        dispatcher: &dyn Dispatcher,
    ) -> Result<Vec<Directive>, ActionError> {
        let action = self
            .actions
            .get(name)
            .ok_or_else(|| ActionError::UnknownAction(name.to_string()))?;

        let result = action.run(request, dispatcher).await;
        match &result {
            Ok(directives) => tracing::debug!(
                action = %name,
                conversation_id = %request.conversation_id,
                directives = directives.len(),
                "Action completed"
            ),
            Err(e) => tracing::warn!(
                action = %name,
                conversation_id = %request.conversation_id,
                code = %e.code(),
                "Action failed: {}",
                e
            ),
        }
        result
    }
}
