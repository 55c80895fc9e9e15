//! Tool registry.
//!
//! Tools are listed in registration order so `GET /tools` is stable.

use crate::protocol::ToolDefinition;
use std::collections::HashMap;

/// Registry of available tools.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any previous tool of the same name in place.
    pub fn register(&mut self, tool: ToolDefinition) {
        match self.index.get(&tool.name) {
            Some(&position) => self.tools[position] = tool,
            None => {
                self.index.insert(tool.name.clone(), self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.index.get(name).map(|&position| &self.tools[position])
    }

    /// Check if a tool exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All tools in registration order.
    pub fn list(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }
}

impl FromIterator<ToolDefinition> for ToolRegistry {
    fn from_iter<I: IntoIterator<Item = ToolDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for tool in iter {
            registry.register(tool);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_tool(name: &str, description: &str) -> ToolDefinition {
        ToolDefinition {
            name: name.to_string(),
            description: Some(description.to_string()),
            input_schema: json!({"type": "object"}),
            annotations: None,
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(create_test_tool("test", "first"));

        assert!(registry.get("test").is_some());
        assert!(registry.get("nonexistent").is_none());
        assert!(registry.contains("test"));
    }

    #[test]
    fn test_registration_order_is_kept() {
        let registry: ToolRegistry = ["zeta", "alpha", "mid"]
            .into_iter()
            .map(|name| create_test_tool(name, name))
            .collect();

        assert_eq!(registry.names(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_reregister_replaces_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(create_test_tool("a", "old"));
        registry.register(create_test_tool("b", "b"));
        registry.register(create_test_tool("a", "new"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().description.as_deref(), Some("new"));
    }
}
