//! Filtered toolset wrappers.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Result, ToolError};
use crate::tool::{ToolArguments, ToolDescriptor, ToolOutput};
use crate::toolset::Toolset;

pub type ToolPredicate = Arc<dyn Fn(&ToolDescriptor) -> bool + Send + Sync>;

/// Toolset wrapper that filters visible/callable tools by predicate.
pub struct FilteredToolset<T> {
    inner: T,
    predicate: ToolPredicate,
}

impl<T> FilteredToolset<T> {
    pub fn new(inner: T, predicate: ToolPredicate) -> Self {
        Self { inner, predicate }
    }
}

fn normalize(values: &[String]) -> HashSet<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

impl<T: Toolset> FilteredToolset<T> {
    /// Hide every tool in `namespaces`, and every tool listed in `names`.
    ///
    /// Entries in `names` match either the bare tool name or the qualified name.
    pub fn from_exclusions(inner: T, namespaces: &[String], names: &[String]) -> Self {
        let namespaces = normalize(namespaces);
        let names = normalize(names);

        let predicate = Arc::new(move |tool: &ToolDescriptor| {
            !namespaces.contains(&tool.namespace)
                && !names.contains(&tool.name)
                && !names.contains(&tool.qualified_name())
        });

        Self::new(inner, predicate)
    }
}

#[async_trait]
impl<T: Toolset> Toolset for FilteredToolset<T> {
    fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.inner
            .list_tools()
            .into_iter()
            .filter(|tool| (self.predicate)(tool))
            .collect()
    }

    async fn call_tool(&self, name: &str, arguments: ToolArguments) -> Result<ToolOutput> {
        if !self
            .list_tools()
            .iter()
            .any(|tool| tool.qualified_name() == name)
        {
            return Err(ToolError::NotFound(name.to_string()));
        }
        self.inner.call_tool(name, arguments).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::registry::ToolRegistry;
    use crate::tool::Tool;

    struct NamedTool {
        namespace: &'static str,
        name: &'static str,
    }

    #[async_trait]
    impl Tool for NamedTool {
        fn namespace(&self) -> &str {
            self.namespace
        }

        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Echo input"
        }

        async fn execute(&self, arguments: ToolArguments) -> Result<ToolOutput> {
            Ok(ToolOutput::text(self.name, arguments))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(NamedTool {
            namespace: "text",
            name: "echo",
        });
        registry.register(NamedTool {
            namespace: "text",
            name: "reverse",
        });
        registry.register(NamedTool {
            namespace: "math",
            name: "add",
        });
        registry
    }

    fn sorted_names(toolset: &impl Toolset) -> Vec<String> {
        let mut names: Vec<String> = toolset
            .list_tools()
            .into_iter()
            .map(|tool| tool.qualified_name())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn exclusions_hide_namespaces_and_names() {
        let toolset = FilteredToolset::from_exclusions(registry(), &["math".to_string()], &[]);
        assert_eq!(
            sorted_names(&toolset),
            vec!["text.echo".to_string(), "text.reverse".to_string()]
        );

        let toolset = FilteredToolset::from_exclusions(
            registry(),
            &[],
            &["reverse".to_string(), "math.add".to_string()],
        );
        assert_eq!(sorted_names(&toolset), vec!["text.echo".to_string()]);
    }

    #[tokio::test]
    async fn blocked_tool_call_returns_not_found() {
        let toolset = FilteredToolset::from_exclusions(registry(), &["text".to_string()], &[]);
        let err = toolset
            .call_tool("text.reverse", ToolArguments::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::NotFound(name) if name == "text.reverse"));

        let output = toolset
            .call_tool("math.add", ToolArguments::new())
            .await
            .unwrap();
        assert_eq!(output.content.as_deref(), Some("add"));
    }
}
