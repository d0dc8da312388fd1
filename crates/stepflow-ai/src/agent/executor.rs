//! Step executor: dispatches a parsed action to its tool.

use std::collections::HashMap;

use stepflow_traits::{ToolArguments, ToolDescriptor, ToolError};
use tracing::{debug, warn};

use super::catalog::{STOP_TOOL_PROMPT, ToolCatalog};
use super::step::Step;
use crate::error::Result;

pub const NO_ACTION_OBSERVATION: &str = "No action found in step";

/// Observation reported when the model names a tool the catalog does not offer.
pub fn tool_not_found_observation(action: &str) -> String {
    format!("The function '{action}' was not found.")
}

fn tool_error_observation(tool: &ToolDescriptor, error: &ToolError) -> String {
    let mut message = format!(
        "Something went wrong in action step: {}. Error: {error}",
        tool.qualified_name()
    );
    if let Some(inner) = error.inner_message() {
        message.push_str(&format!(" [{inner}]"));
    }
    message
}

/// Build the invocation context: ambient state, overlaid with the step's
/// variables, with declared parameters filled from their defaults.
pub fn build_invocation_context(
    ambient: &ToolArguments,
    step: &Step,
    tool: &ToolDescriptor,
) -> ToolArguments {
    let mut context = ambient.clone();
    context.extend(step.variables());
    for parameter in &tool.parameters {
        context
            .entry(parameter.name.clone())
            .or_insert_with(|| parameter.default_value.clone().unwrap_or_default());
    }
    context
}

pub struct StepExecutor<'a> {
    catalog: &'a ToolCatalog,
}

impl<'a> StepExecutor<'a> {
    pub fn new(catalog: &'a ToolCatalog) -> Self {
        Self { catalog }
    }

    /// Run the step's action and return its observation.
    ///
    /// Every key of the invocation context is written back to `ambient` after
    /// a successful call, taking the tool's returned value when it has one. Unknown tools and retryable tool failures become
    /// observations; any other tool error is returned.
    pub async fn execute(&self, step: &Step, ambient: &mut ToolArguments) -> Result<String> {
        let Some(action) = step
            .action
            .as_deref()
            .map(str::trim)
            .filter(|action| !action.is_empty())
        else {
            return Ok(NO_ACTION_OBSERVATION.to_string());
        };

        if self.catalog.is_stop_action(action) {
            return Ok(step
                .variables()
                .remove(STOP_TOOL_PROMPT)
                .unwrap_or_default());
        }

        let tools: HashMap<String, ToolDescriptor> = self
            .catalog
            .toolset()
            .list_tools()
            .into_iter()
            .map(|tool| (tool.qualified_name(), tool))
            .collect();

        let Some(tool) = tools.get(action) else {
            warn!(action, "Model selected an unknown tool");
            return Ok(tool_not_found_observation(action));
        };

        let context = build_invocation_context(ambient, step, tool);
        debug!(action, arguments = context.len(), "Invoking tool");

        match self
            .catalog
            .toolset()
            .call_tool(action, context.clone())
            .await
        {
            Ok(output) => {
                for (key, value) in context {
                    let value = output.arguments.get(&key).cloned().unwrap_or(value);
                    ambient.insert(key, value);
                }
                Ok(output.content.unwrap_or_default())
            }
            Err(ToolError::NotFound(_)) => {
                warn!(action, "Tool disappeared before dispatch");
                Ok(tool_not_found_observation(action))
            }
            Err(error) if error.is_retryable() => {
                warn!(action, error = %error, "Retryable tool failure");
                Ok(tool_error_observation(tool, &error))
            }
            Err(error) => Err(error.into()),
        }
    }
}
