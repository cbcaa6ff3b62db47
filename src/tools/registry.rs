use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use super::Tool;
use crate::protocol::ProtocolError;

/// Registry for tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&dyn Tool> {
        self.tools.values().map(|t| t.as_ref()).collect()
    }

    /// Look up a tool by name and execute it with the given payload.
    pub async fn dispatch(&self, name: &str, payload: Value) -> Result<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| ProtocolError::UnknownTool(name.to_string()))?;
        tool.execute(payload).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::RunCommandTool;

    #[tokio::test]
    async fn dispatch_unknown_tool_fails() {
        let registry = ToolRegistry::new();
        let err = registry
            .dispatch("no_such_tool", Value::Null)
            .await
            .expect_err("should fail");
        let protocol_err = err
            .downcast_ref::<ProtocolError>()
            .expect("should be a protocol error");
        assert!(
            matches!(protocol_err, ProtocolError::UnknownTool(name) if name.as_str() == "no_such_tool")
        );
    }

    #[tokio::test]
    async fn dispatch_registered_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(RunCommandTool);
        let result = registry
            .dispatch("run_command", Value::String("true".to_string()))
            .await
            .expect("should dispatch");
        assert!(result.contains("true"));
    }
}
