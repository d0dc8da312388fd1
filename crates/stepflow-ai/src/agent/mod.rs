//! Agent module - ReAct step engine
//!
//! 1. Think - the model reasons about the scratch pad of prior steps
//! 2. Decide - the model picks a tool or gives a final answer
//! 3. Act - the chosen tool runs against the ambient state
//! 4. Observe - the result is recorded on the step
//! 5. Repeat (caller-driven) until a final answer or the iteration cap
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stepflow_ai::agent::{ReActConfig, ReActEngine, ReActRunner};
//!
//! let engine = ReActEngine::new(llm, toolset, ReActConfig::default());
//! let result = ReActRunner::new(engine)
//!     .run("What is 2 + 3?", &mut ambient, &cancel)
//!     .await?;
//! ```

mod catalog;
mod config;
mod engine;
mod executor;
pub mod react;
mod runner;
mod scratchpad;
mod step;

pub use catalog::{
    STOP_TOOL_NAME, STOP_TOOL_NAMESPACE, STOP_TOOL_PROMPT, ToolCatalog, describe_tools,
    is_stop_tool, stop_tool_descriptor,
};
pub use config::{DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_TOKENS, ReActConfig};
pub use engine::{PARSE_FAILURE_OBSERVATION, ReActEngine};
pub use executor::{
    NO_ACTION_OBSERVATION, StepExecutor, build_invocation_context, tool_not_found_observation,
};
pub use react::{ReActState, ResponseParser};
pub use runner::{AgentResult, AgentStatus, ReActRunner};
pub use scratchpad::{
    SCRATCH_PAD_PREFIX, ScratchpadBuilder, approximate_tokens, is_system_key,
};
pub use step::{ActionPayload, Step};
