//! Form session lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle state of one form collection.
///
/// - `Collecting`: at least one required slot is still unfilled
/// - `Complete`: every required slot holds an accepted value
/// - `Submitted`: the submit step ran (terminal)
/// - `Cancelled`: discarded by an external cancellation signal (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Collecting,
    Complete,
    Submitted,
    Cancelled,
}

impl FormStatus {
    /// Returns true if the session takes candidate values in this state.
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::Collecting)
    }

    /// Returns true until the session is submitted or cancelled.
    pub fn is_open(&self) -> bool {
        !StateMachine::is_terminal(self)
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormStatus::Collecting => "collecting",
            FormStatus::Complete => "complete",
            FormStatus::Submitted => "submitted",
            FormStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl StateMachine for FormStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FormStatus::*;
        matches!(
            (self, target),
            // Accepted value for a slot that is not the last one
            (Collecting, Collecting) |
            // Accepted value for the last unfilled slot
            (Collecting, Complete) |
            (Complete, Submitted) |
            // External cancellation signal
            (Collecting, Cancelled) |
            (Complete, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FormStatus::*;
        match self {
            Collecting => vec![Collecting, Complete, Cancelled],
            Complete => vec![Submitted, Cancelled],
            Submitted => vec![],
            Cancelled => vec![],
        }
    }
}
