//! Directives an action hands back to the host runtime.

use serde::{Deserialize, Serialize};

/// An instruction the host applies to the conversation after an action
/// ran. Actions never reach into conversation history themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Directive {
    /// Drop the user turn that triggered the action from the history
    /// used for dialogue-policy context.
    DiscardLastTurn,
}
