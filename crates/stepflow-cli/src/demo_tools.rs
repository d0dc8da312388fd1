//! Built-in tools offered to scripted runs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use stepflow_traits::{
    Tool, ToolArguments, ToolError, ToolOutput, ToolParameter, ToolRegistry, ToolResult,
    required_argument,
};

/// Registry with `math.add`, `text.upper` and `time.now`.
pub fn demo_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(AddTool);
    registry.register(UpperTool);
    registry.register(NowTool);
    registry
}

pub fn demo_toolset() -> Arc<ToolRegistry> {
    Arc::new(demo_registry())
}

/// Unparseable numbers are retryable: the model gets the error as an observation.
fn parse_number(arguments: &ToolArguments, key: &str) -> ToolResult<f64> {
    let raw = required_argument(arguments, key)?;
    raw.trim().parse::<f64>().map_err(|e| {
        ToolError::retryable_with_inner(format!("'{key}' is not a number: '{raw}'"), e.to_string())
    })
}

pub struct AddTool;

#[async_trait]
impl Tool for AddTool {
    fn namespace(&self) -> &str {
        "math"
    }

    fn name(&self) -> &str {
        "add"
    }

    fn description(&self) -> &str {
        "Add two numbers"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![
            ToolParameter::new("a", "First addend"),
            ToolParameter::new("b", "Second addend").with_default("0"),
        ]
    }

    async fn execute(&self, arguments: ToolArguments) -> ToolResult<ToolOutput> {
        let sum = parse_number(&arguments, "a")? + parse_number(&arguments, "b")?;
        Ok(ToolOutput::text(sum.to_string(), arguments))
    }
}

/// Uppercases `text` and writes the result back into the same key.
pub struct UpperTool;

#[async_trait]
impl Tool for UpperTool {
    fn namespace(&self) -> &str {
        "text"
    }

    fn name(&self) -> &str {
        "upper"
    }

    fn description(&self) -> &str {
        "Convert text to upper case"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![ToolParameter::new("text", "Text to convert")]
    }

    async fn execute(&self, mut arguments: ToolArguments) -> ToolResult<ToolOutput> {
        let upper = required_argument(&arguments, "text")?.to_uppercase();
        arguments.insert("text".to_string(), upper.clone());
        Ok(ToolOutput::text(upper, arguments))
    }
}

pub struct NowTool;

#[async_trait]
impl Tool for NowTool {
    fn namespace(&self) -> &str {
        "time"
    }

    fn name(&self) -> &str {
        "now"
    }

    fn description(&self) -> &str {
        "Current UTC time in RFC 3339 format"
    }

    async fn execute(&self, arguments: ToolArguments) -> ToolResult<ToolOutput> {
        Ok(ToolOutput::text(Utc::now().to_rfc3339(), arguments))
    }
}
