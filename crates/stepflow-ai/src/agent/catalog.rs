//! Tool catalog adapter.
//!
//! Presents the external toolset to the engine: exclusions applied, entries
//! sorted by `(namespace, name)` so the model sees a stable ordering, and the
//! optional stop-and-ask-user tool appended last.

use std::sync::Arc;

use stepflow_traits::{FilteredToolset, ToolDescriptor, ToolParameter, Toolset, qualified_name};

use super::config::ReActConfig;

pub const STOP_TOOL_NAMESPACE: &str = "_REACT_ENGINE_";
pub const STOP_TOOL_NAME: &str = "StopAndPromptUser";
pub const STOP_TOOL_PROMPT: &str = "prompt";

/// Descriptor of the synthetic tool that ends the loop and hands a question
/// back to the user.
pub fn stop_tool_descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        STOP_TOOL_NAMESPACE,
        STOP_TOOL_NAME,
        "Terminate the session, only used when previous attempts failed with FATAL error and need notify user",
    )
    .with_parameter(ToolParameter::new(
        STOP_TOOL_PROMPT,
        "The message to show to the user",
    ))
}

pub fn is_stop_tool(name: &str) -> bool {
    name == qualified_name(STOP_TOOL_NAMESPACE, STOP_TOOL_NAME)
}

pub struct ToolCatalog {
    toolset: FilteredToolset<Arc<dyn Toolset>>,
    auto_termination: bool,
}

impl ToolCatalog {
    pub fn new(toolset: Arc<dyn Toolset>, config: &ReActConfig) -> Self {
        Self {
            toolset: FilteredToolset::from_exclusions(
                toolset,
                &config.excluded_namespaces,
                &config.excluded_names,
            ),
            auto_termination: config.enable_auto_termination,
        }
    }

    /// Toolset with exclusions enforced on both listing and dispatch.
    pub fn toolset(&self) -> &dyn Toolset {
        &self.toolset
    }

    /// True when `name` is the stop tool and this catalog offers it.
    pub fn is_stop_action(&self, name: &str) -> bool {
        self.auto_termination && is_stop_tool(name)
    }

    /// Currently invocable tools, queried fresh from the toolset.
    pub fn list_available(&self) -> Vec<ToolDescriptor> {
        let mut tools = self.toolset.list_tools();
        tools.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));
        if self.auto_termination {
            tools.push(stop_tool_descriptor());
        }
        tools
    }
}

/// Render the `function_descriptions` block shown to the model.
pub fn describe_tools(tools: &[ToolDescriptor]) -> String {
    let mut out = String::new();
    for tool in tools {
        out.push_str(&format!("{}: {}\n", tool.qualified_name(), tool.description));
        if tool.parameters.is_empty() {
            continue;
        }
        out.push_str("  inputs:\n");
        for parameter in &tool.parameters {
            out.push_str(&format!("    - {}: {}", parameter.name, parameter.description));
            if let Some(default) = &parameter.default_value {
                out.push_str(&format!(" (default: \"{default}\")"));
            }
            out.push('\n');
        }
    }
    out.trim_end().to_string()
}
