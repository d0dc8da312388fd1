//! Error types for tool execution.

use thiserror::Error;

/// Errors raised by tools and toolsets.
///
/// Classification matters to the engine: [`ToolError::Retryable`] failures are
/// reported back to the model as an observation, everything else aborts the
/// current step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("{message}")]
    Retryable {
        message: String,
        inner: Option<String>,
    },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution failed: {0}")]
    Execution(String),
}

impl ToolError {
    /// Build a retryable error without an inner cause.
    pub fn retryable(message: impl Into<String>) -> Self {
        Self::Retryable {
            message: message.into(),
            inner: None,
        }
    }

    /// Build a retryable error that wraps an inner cause.
    pub fn retryable_with_inner(message: impl Into<String>, inner: impl Into<String>) -> Self {
        Self::Retryable {
            message: message.into(),
            inner: Some(inner.into()),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable { .. })
    }

    pub fn inner_message(&self) -> Option<&str> {
        match self {
            Self::Retryable { inner, .. } => inner.as_deref(),
            _ => None,
        }
    }
}

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;
