//! LLM client trait and types

use async_trait::async_trait;
use stepflow_traits::ToolArguments;

use crate::error::Result;

/// Context key holding the user question.
pub const QUESTION_KEY: &str = "question";
/// Context key holding the rendered scratch pad.
pub const SCRATCH_PAD_KEY: &str = "agent_scratch_pad";
/// Context key holding the rendered tool descriptions.
pub const FUNCTION_DESCRIPTIONS_KEY: &str = "function_descriptions";
/// Context key reserved for an orchestrator-provided chat transcript.
pub const CHAT_HISTORY_KEY: &str = "chat_history";

/// LLM completion request.
///
/// The engine does not render prompts itself: the client receives the named
/// values and owns the template that turns them into provider messages.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub context: ToolArguments,
}

impl CompletionRequest {
    /// Create a new completion request
    pub fn new(context: ToolArguments) -> Self {
        Self { context }
    }

    /// Look up a context value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }

    pub fn question(&self) -> Option<&str> {
        self.get(QUESTION_KEY)
    }
}

/// LLM client trait
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Get provider name
    fn provider(&self) -> &str;

    /// Get model name
    fn model(&self) -> &str;

    /// Complete a request, returning the raw model text
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
