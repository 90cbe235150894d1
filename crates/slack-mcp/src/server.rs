//! MCP server implementation
//!
//! Tool registry and request router. Tools register in a fixed order at
//! startup; `tools/list` reports them in registration order. The call path
//! validates required arguments against the tool's schema before invoking
//! it, and converts every failure into a `{"error": ...}` text payload so
//! nothing ever escapes to the transport as an exception.

use crate::client::SlackError;
use crate::types::*;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::error;

/// MCP server error types.
#[derive(Debug, Error)]
pub enum McpServerError {
    /// Unrecognized tool name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Missing or malformed tool arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Upstream Slack call failed
    #[error("Upstream failure: {0}")]
    Upstream(#[from] SlackError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for MCP server operations.
pub type McpServerResult<T> = Result<T, McpServerError>;

/// Trait for tool implementations.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition.
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with given arguments.
    async fn execute(&self, args: serde_json::Value) -> McpServerResult<ToolResult>;
}

/// MCP server exposing Slack operations as tools.
pub struct McpServer {
    /// Server info
    info: ServerInfo,

    /// Server capabilities
    capabilities: ServerCapabilities,

    /// Registered tools, in registration order
    tools: RwLock<Vec<Arc<dyn Tool>>>,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolCapabilities {
                    list_changed: false,
                }),
            },
            tools: RwLock::new(Vec::new()),
        }
    }

    /// Register a tool. Registration order is the `tools/list` order.
    pub async fn register_tool(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().await;
        tools.push(tool);
    }

    /// Register multiple tools.
    pub async fn register_tools(&self, tools: Vec<Arc<dyn Tool>>) {
        for tool in tools {
            self.register_tool(tool).await;
        }
    }

    /// Get all tool definitions, in registration order.
    pub async fn list_tools(&self) -> Vec<ToolDefinition> {
        let tools = self.tools.read().await;
        tools.iter().map(|t| t.definition()).collect()
    }

    /// Execute a tool.
    ///
    /// Validates that every argument named in the tool schema's `required`
    /// array is present before dispatching.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> McpServerResult<ToolResult> {
        let tool = {
            let tools = self.tools.read().await;
            tools
                .iter()
                .find(|t| t.definition().name == name)
                .cloned()
                .ok_or_else(|| McpServerError::UnknownTool(name.to_string()))?
        };

        // A missing argument bag behaves like an empty one.
        let arguments = match arguments {
            serde_json::Value::Null => serde_json::json!({}),
            other => other,
        };

        let definition = tool.definition();
        let missing: Vec<&str> = definition
            .required_arguments()
            .into_iter()
            .filter(|arg| arguments.get(arg).map_or(true, |v| v.is_null()))
            .collect();
        if !missing.is_empty() {
            return Err(McpServerError::InvalidArguments(format!(
                "Missing required arguments: {}",
                missing.join(", ")
            )));
        }

        tool.execute(arguments).await
    }

    /// Handle an MCP request.
    pub async fn handle_request(&self, request: McpRequest) -> McpResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "tools/list" => self.handle_tools_list(request.id).await,
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => McpResponse::error(request.id, McpError::method_not_found(&request.method)),
        }
    }

    fn handle_initialize(&self, id: RequestId) -> McpResponse {
        McpResponse::success(
            id,
            serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": self.capabilities,
                "serverInfo": self.info
            }),
        )
    }

    async fn handle_tools_list(&self, id: RequestId) -> McpResponse {
        let tools = self.list_tools().await;
        McpResponse::success(id, serde_json::json!({ "tools": tools }))
    }

    async fn handle_tools_call(
        &self,
        id: RequestId,
        params: Option<serde_json::Value>,
    ) -> McpResponse {
        let params = match params {
            Some(p) => p,
            None => return McpResponse::error(id, McpError::invalid_params("Missing params")),
        };

        let call: ToolCall = match serde_json::from_value(params) {
            Ok(c) => c,
            Err(e) => return McpResponse::error(id, McpError::invalid_params(e.to_string())),
        };

        // Single error-to-payload boundary: tool failures become an
        // {"error": ...} text result, never a transport-level error.
        let result = match self.call_tool(&call.name, call.arguments).await {
            Ok(result) => result,
            Err(e) => {
                error!("Tool {} failed: {}", call.name, e);
                ToolResult::error_payload(e.to_string())
            }
        };

        match serde_json::to_value(result) {
            Ok(value) => McpResponse::success(id, value),
            Err(e) => McpResponse::error(id, McpError::internal_error(e.to_string())),
        }
    }

    /// Get server info.
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Get server capabilities.
    pub fn capabilities(&self) -> &ServerCapabilities {
        &self.capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentBlock;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition::new("echo", "Echo the arguments back").with_schema(serde_json::json!({
                "type": "object",
                "properties": {
                    "text": {"type": "string"}
                },
                "required": ["text"]
            }))
        }

        async fn execute(&self, args: serde_json::Value) -> McpServerResult<ToolResult> {
            Ok(ToolResult::json(&args))
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition::new("failing", "Always fails")
        }

        async fn execute(&self, _args: serde_json::Value) -> McpServerResult<ToolResult> {
            Err(McpServerError::Internal("boom".to_string()))
        }
    }

    fn payload_of(result: &ToolResult) -> serde_json::Value {
        let ContentBlock::Text { text } = &result.content[0];
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_list_preserves_registration_order() {
        let server = McpServer::new("slack-mcp", "0.1.0");
        server.register_tool(Arc::new(FailingTool)).await;
        server.register_tool(Arc::new(EchoTool)).await;

        let tools = server.list_tools().await;
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "failing");
        assert_eq!(tools[1].name, "echo");
    }

    #[tokio::test]
    async fn test_call_tool() {
        let server = McpServer::new("slack-mcp", "0.1.0");
        server.register_tool(Arc::new(EchoTool)).await;

        let result = server
            .call_tool("echo", serde_json::json!({"text": "hi"}))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(payload_of(&result)["text"], "hi");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let server = McpServer::new("slack-mcp", "0.1.0");

        let err = server
            .call_tool("nope", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, McpServerError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn test_missing_required_arguments() {
        let server = McpServer::new("slack-mcp", "0.1.0");
        server.register_tool(Arc::new(EchoTool)).await;

        let err = server
            .call_tool("echo", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid arguments: Missing required arguments: text"
        );
    }

    #[tokio::test]
    async fn test_null_argument_counts_as_missing() {
        let server = McpServer::new("slack-mcp", "0.1.0");
        server.register_tool(Arc::new(EchoTool)).await;

        let err = server
            .call_tool("echo", serde_json::json!({"text": null}))
            .await
            .unwrap_err();
        assert!(matches!(err, McpServerError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_tool_failure_becomes_error_payload() {
        let server = McpServer::new("slack-mcp", "0.1.0");
        server.register_tool(Arc::new(FailingTool)).await;

        let request = McpRequest::new("1", "tools/call").with_params(serde_json::json!({
            "name": "failing",
            "arguments": {}
        }));
        let response = server.handle_request(request).await;

        // The transport sees a success response carrying an error payload.
        assert!(response.error.is_none());
        let result: ToolResult = serde_json::from_value(response.result.unwrap()).unwrap();
        assert!(result.is_error);
        assert_eq!(payload_of(&result)["error"], "Internal error: boom");
    }

    #[tokio::test]
    async fn test_handle_initialize() {
        let server = McpServer::new("slack-mcp", "0.1.0");

        let req = McpRequest::new("1", "initialize");
        let resp = server.handle_request(req).await;

        assert!(resp.result.is_some());
        assert!(resp.error.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = McpServer::new("slack-mcp", "0.1.0");

        let req = McpRequest::new("1", "prompts/list");
        let resp = server.handle_request(req).await;

        assert!(resp.result.is_none());
        assert_eq!(resp.error.unwrap().code, McpError::METHOD_NOT_FOUND);
    }
}
