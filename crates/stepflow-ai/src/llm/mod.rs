//! LLM module - model completion abstraction

mod client;
mod mock_client;

pub use client::{
    CHAT_HISTORY_KEY, CompletionRequest, FUNCTION_DESCRIPTIONS_KEY, LlmClient, QUESTION_KEY,
    SCRATCH_PAD_KEY,
};
pub use mock_client::{MockLlmClient, MockStep, MockStepKind};
