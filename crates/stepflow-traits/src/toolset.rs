//! Composable toolset abstraction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::registry::ToolRegistry;
use crate::tool::{ToolArguments, ToolDescriptor, ToolOutput};

/// Common abstraction over tool catalogs.
///
/// `list_tools` is queried on every engine turn, so implementations may change
/// the visible set between calls.
#[async_trait]
pub trait Toolset: Send + Sync {
    /// List descriptors for all currently available tools.
    fn list_tools(&self) -> Vec<ToolDescriptor>;

    /// Call a tool by qualified name.
    async fn call_tool(&self, name: &str, arguments: ToolArguments) -> Result<ToolOutput>;
}

#[async_trait]
impl Toolset for ToolRegistry {
    fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.descriptors()
    }

    async fn call_tool(&self, name: &str, arguments: ToolArguments) -> Result<ToolOutput> {
        self.execute(name, arguments).await
    }
}

#[async_trait]
impl<T: Toolset + ?Sized> Toolset for Arc<T> {
    fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.as_ref().list_tools()
    }

    async fn call_tool(&self, name: &str, arguments: ToolArguments) -> Result<ToolOutput> {
        self.as_ref().call_tool(name, arguments).await
    }
}
