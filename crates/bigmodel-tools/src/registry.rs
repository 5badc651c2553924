//! Tool trait and the registry a host runtime discovers tools through

use crate::types::{ToolDefinition, ToolOutcome};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// No tool with this name is registered
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A tool with this name is already registered
    #[error("Tool already registered: {0}")]
    AlreadyRegistered(String),
}

/// A named, schema-described operation a host can invoke
///
/// Implementations must be Send + Sync; hosts may call the same tool
/// concurrently.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Fixed tool name
    fn name(&self) -> &str;

    /// Human-readable label
    fn label(&self) -> &str;

    /// Description for the model
    fn description(&self) -> &str;

    /// JSON Schema of the accepted parameters
    fn parameters(&self) -> Value;

    /// Full definition for discovery
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            self.name(),
            self.label(),
            self.description(),
            self.parameters(),
        )
    }

    /// Invoke with raw JSON parameters
    ///
    /// Parameter rejection is reported through the outcome, never as a panic
    /// or error.
    async fn call(&self, params: Value) -> ToolOutcome;
}

/// Tools keyed by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::AlreadyRegistered(name));
        }

        info!("Registered tool {} ({})", name, tool.label());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Look up a tool
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Definitions of every tool, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Invoke a tool by name
    pub async fn invoke(&self, name: &str, params: Value) -> Result<ToolOutcome, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        debug!("Invoking tool {}", name);
        Ok(tool.call(params).await)
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.tools.keys().collect();
        names.sort();
        f.debug_struct("ToolRegistry").field("tools", &names).finish()
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

        fn label(&self) -> &str {
            "Echo"
        }

        fn description(&self) -> &str {
            "Returns its input"
        }

        fn parameters(&self) -> Value {
            json!({"type": "object"})
        }

        async fn call(&self, params: Value) -> ToolOutcome {
            ToolOutcome::success(params.to_string(), params)
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let err = registry.register(Arc::new(EchoTool)).unwrap_err();
        assert_eq!(err, ToolError::AlreadyRegistered("echo".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn definition_carries_label_and_schema() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let defs = registry.definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "echo");
        assert_eq!(defs[0].label, "Echo");
        assert_eq!(defs[0].parameters, json!({"type": "object"}));
    }

    #[tokio::test]
    async fn invoke_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool)).unwrap();

        let outcome = registry.invoke("echo", json!({"a": 1})).await.unwrap();
        assert_eq!(outcome.details(), Some(&json!({"a": 1})));
    }

    #[tokio::test]
    async fn invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("missing", json!({})).await.unwrap_err();
        assert_eq!(err, ToolError::NotFound("missing".to_string()));
    }
}
