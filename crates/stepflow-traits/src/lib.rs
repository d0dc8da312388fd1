//! StepFlow Traits - Shared tool contracts.
//!
//! This crate provides the interfaces shared across the StepFlow workspace:
//! - Tool trait, ToolDescriptor, ToolParameter, ToolOutput
//! - ToolError with retryable classification
//! - Toolset catalog abstraction, ToolRegistry and FilteredToolset

pub mod error;
pub mod filtered;
pub mod registry;
pub mod tool;
pub mod toolset;

// Error types
pub use error::{Result as ToolResult, ToolError};

// Tool trait and core types
pub use tool::{
    Tool, ToolArguments, ToolDescriptor, ToolOutput, ToolParameter, qualified_name,
    required_argument,
};

// Registry and toolsets
pub use filtered::{FilteredToolset, ToolPredicate};
pub use registry::ToolRegistry;
pub use toolset::Toolset;
