//! Engine state derived from the step history.

use std::fmt;

use crate::agent::step::Step;

/// Logical state of a ReAct task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReActState {
    Thinking,
    Acting { action: String },
    Done { answer: String },
}

impl ReActState {
    /// State after `last` was appended to the history; `None` means no step yet.
    pub fn from_step(last: Option<&Step>) -> Self {
        let Some(step) = last else {
            return Self::Thinking;
        };

        if step.is_terminal() {
            return Self::Done {
                answer: step.final_answer.clone().unwrap_or_default(),
            };
        }

        if step.is_actionable() {
            return Self::Acting {
                action: step.action.clone().unwrap_or_default(),
            };
        }

        Self::Thinking
    }
}

impl fmt::Display for ReActState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thinking => write!(f, "thinking"),
            Self::Acting { action } => write!(f, "acting({action})"),
            Self::Done { .. } => write!(f, "done"),
        }
    }
}
