//! StepFlow AI - ReAct step engine
//!
//! This crate provides:
//! - Scratch pad rendering bounded by a token budget
//! - A tag-based parser for model output (`[THOUGHT]`, `[ACTION]`, `[FINAL ANSWER]`)
//! - Tool catalog presentation and step execution over a `Toolset`
//! - The per-step engine and a caller-side runner loop
//! - An `LlmClient` abstraction with a scripted mock client

pub mod agent;
pub mod error;
pub mod llm;

// Re-export commonly used types
pub use agent::{
    AgentResult, AgentStatus, ReActConfig, ReActEngine, ReActRunner, ReActState, ResponseParser,
    Step, ToolCatalog,
};
pub use error::{AiError, Result};
pub use llm::{CompletionRequest, LlmClient, MockLlmClient, MockStep};
pub use stepflow_traits::{
    FilteredToolset, Tool, ToolArguments, ToolDescriptor, ToolError, ToolOutput, ToolParameter,
    ToolRegistry, Toolset,
};
pub use tokio_util::sync::CancellationToken;
