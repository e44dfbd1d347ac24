use crate::types::{ToolDefinition, ToolOutcome};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A named, schema-described callable the model may request during a turn.
///
/// `execute` never raises past this boundary: expected failures (validation,
/// timeouts, upstream errors) come back as failed [`ToolOutcome`] values.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    async fn execute(&self, args: Value) -> ToolOutcome;
}

/// Name-keyed collection of available tools, built once at agent construction.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name. Absence is not an error here; the caller
    /// decides whether it is one.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Machine-readable descriptors for inclusion in a model request.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes back the input"
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "message": { "type": "string" }
                },
                "required": ["message"]
            })
        }

        async fn execute(&self, args: Value) -> ToolOutcome {
            ToolOutcome::ok(json!({ "echo": args["message"] }))
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.tool_names().len(), 0);
        assert!(registry.get("echo").is_none());
    }

    #[test]
    fn test_registry_registration_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        assert!(registry.has_tool("echo"));
        assert!(registry.get("echo").is_some());
        assert!(!registry.has_tool("missing"));
    }

    #[test]
    fn test_definitions_are_llm_ready() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);

        for def in &definitions {
            assert!(!def.name.is_empty());
            assert!(!def.description.is_empty());
            assert_eq!(def.parameters["type"], "object");
            assert!(def.parameters.get("properties").is_some());
        }
    }

    #[tokio::test]
    async fn test_tool_execution_through_registry() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let tool = registry.get("echo").unwrap();
        let outcome = tool.execute(json!({ "message": "Hello" })).await;
        assert!(outcome.success);
        assert_eq!(outcome.data.unwrap()["echo"], "Hello");
    }
}
