//! Tool trait and types for agent tools.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};

/// String key/value bag used for tool arguments and ambient conversation state.
pub type ToolArguments = BTreeMap<String, String>;

/// A single declared input of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default_value: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Catalog entry describing an invocable tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub namespace: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ToolParameter>,
}

impl ToolDescriptor {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ToolParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// `<namespace>.<name>`, the identifier the model uses to pick this tool.
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.namespace, &self.name)
    }
}

impl fmt::Display for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// Join a namespace and a tool name.
pub fn qualified_name(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

/// Result of tool execution.
///
/// Tools receive their invocation context by value and hand it back in
/// `arguments`, including any values they changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub content: Option<String>,
    pub arguments: ToolArguments,
}

impl ToolOutput {
    /// Create an output with text content.
    pub fn text(content: impl Into<String>, arguments: ToolArguments) -> Self {
        Self {
            content: Some(content.into()),
            arguments,
        }
    }
}

/// Core trait for agent tools.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Namespace (plugin) the tool belongs to.
    fn namespace(&self) -> &str;

    /// Tool name, unique within its namespace.
    fn name(&self) -> &str;

    /// Human-readable description for LLM context.
    fn description(&self) -> &str;

    /// Declared inputs, in presentation order.
    fn parameters(&self) -> Vec<ToolParameter> {
        Vec::new()
    }

    /// Execute the tool with the given invocation context.
    async fn execute(&self, arguments: ToolArguments) -> Result<ToolOutput>;

    /// Build the catalog descriptor for this tool.
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            namespace: self.namespace().to_string(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

/// Fetch a required argument or fail with [`ToolError::InvalidArguments`].
pub fn required_argument<'a>(arguments: &'a ToolArguments, key: &str) -> Result<&'a str> {
    arguments
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| ToolError::InvalidArguments(format!("missing required argument '{key}'")))
}
