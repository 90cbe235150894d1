//! Search tools
//!
//! Tool for searching messages across the workspace.

use crate::client::SlackClient;
use crate::enrich::EnrichmentPipeline;
use crate::server::{McpServerError, McpServerResult, Tool};
use crate::types::{ToolDefinition, ToolResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Tool to search messages across the workspace.
///
/// Matches in search results are nested per-channel; the enrichment
/// pipeline resolves user IDs at every depth.
pub struct SearchMessagesTool {
    client: Arc<SlackClient>,
    pipeline: Arc<EnrichmentPipeline>,
}

impl SearchMessagesTool {
    /// Create the tool with shared client and pipeline handles.
    pub fn new(client: Arc<SlackClient>, pipeline: Arc<EnrichmentPipeline>) -> Self {
        Self { client, pipeline }
    }
}

#[async_trait]
impl Tool for SearchMessagesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "slack_search_messages",
            "Search messages across the workspace",
        )
        .with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query, supports Slack search modifiers like in:#channel"
                },
                "count": {
                    "type": "number",
                    "description": "Number of results per page (default 20, max 100)",
                    "default": 20
                },
                "page": {
                    "type": "number",
                    "description": "Page number of results (default 1)",
                    "default": 1
                }
            },
            "required": ["query"]
        }))
    }

    #[instrument(skip(self), fields(tool = "slack_search_messages"))]
    async fn execute(&self, args: serde_json::Value) -> McpServerResult<ToolResult> {
        let params: SearchMessagesParams = serde_json::from_value(args)
            .map_err(|e| McpServerError::InvalidArguments(e.to_string()))?;

        let count = params.count.unwrap_or(20).min(100);
        let page = params.page.unwrap_or(1).max(1);
        debug!("Searching messages (count {}, page {})", count, page);

        let raw = self
            .client
            .search_messages(&params.query, count, page)
            .await?;
        let enriched = self.pipeline.process(raw).await;

        Ok(ToolResult::json(&enriched))
    }
}

#[derive(Debug, Deserialize)]
struct SearchMessagesParams {
    query: String,
    count: Option<u32>,
    page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_defaults() {
        let params: SearchMessagesParams =
            serde_json::from_value(serde_json::json!({"query": "deploy"})).unwrap();
        assert_eq!(params.count.unwrap_or(20), 20);
        assert_eq!(params.page.unwrap_or(1), 1);
    }

    #[test]
    fn test_search_count_capped() {
        let params: SearchMessagesParams =
            serde_json::from_value(serde_json::json!({"query": "deploy", "count": 500})).unwrap();
        assert_eq!(params.count.unwrap().min(100), 100);
    }
}
