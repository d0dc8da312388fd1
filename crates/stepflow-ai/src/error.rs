//! Error types for the AI module

use stepflow_traits::ToolError;
use thiserror::Error;

/// AI module error types
#[derive(Error, Debug)]
pub enum AiError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for AI operations
pub type Result<T> = std::result::Result<T, AiError>;
