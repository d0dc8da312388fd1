//! ReAct (Reasoning + Acting) response grammar.
//!
//! Model output is expected to contain tagged sections:
//!
//! ```text
//! [THOUGHT] reasoning about the next move
//! [ACTION] {"action": "<namespace>.<name>", "action_variables": {"key": "value"}}
//! [FINAL ANSWER] text returned to the user
//! ```

mod parser;
mod state;

pub use parser::{NO_THOUGHT_OR_ACTION, ResponseParser};
pub use state::ReActState;

pub const THOUGHT_TAG: &str = "[THOUGHT]";
pub const ACTION_TAG: &str = "[ACTION]";
pub const OBSERVATION_TAG: &str = "[OBSERVATION]";
/// Prefix of every final tag (`[FINAL ANSWER]`, `[FINAL ACTION]`, ...),
/// matched case-insensitively.
pub const FINAL_TAG_PREFIX: &str = "[FINAL";
