//! Tool registry for managing available tools

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, ToolError};
use crate::tool::{Tool, ToolArguments, ToolDescriptor, ToolOutput, qualified_name};

/// Registry for managing available tools, keyed by qualified name
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    /// Register a tool from Arc
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        let key = qualified_name(tool.namespace(), tool.name());
        if self.tools.insert(key.clone(), tool).is_some() {
            debug!(tool = %key, "Replaced previously registered tool");
        }
    }

    /// Get a tool by qualified name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get descriptors for all registered tools
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.values().map(|t| t.descriptor()).collect()
    }

    /// Execute a tool by qualified name
    pub async fn execute(&self, name: &str, arguments: ToolArguments) -> Result<ToolOutput> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(arguments).await
    }
}
