//! Channel tools
//!
//! Tools for listing channels and reading channel history.

use crate::client::SlackClient;
use crate::enrich::EnrichmentPipeline;
use crate::server::{McpServerError, McpServerResult, Tool};
use crate::types::{ToolDefinition, ToolResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Tool to list public channels in the workspace.
pub struct ListChannelsTool {
    client: Arc<SlackClient>,
    pipeline: Arc<EnrichmentPipeline>,
}

impl ListChannelsTool {
    /// Create the tool with shared client and pipeline handles.
    pub fn new(client: Arc<SlackClient>, pipeline: Arc<EnrichmentPipeline>) -> Self {
        Self { client, pipeline }
    }
}

#[async_trait]
impl Tool for ListChannelsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "slack_list_channels",
            "List public channels in the workspace with pagination",
        )
        .with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "number",
                    "description": "Maximum number of channels to return (default 100, max 200)",
                    "default": 100
                },
                "cursor": {
                    "type": "string",
                    "description": "Pagination cursor for the next page of results"
                }
            },
            "required": []
        }))
    }

    #[instrument(skip(self), fields(tool = "slack_list_channels"))]
    async fn execute(&self, args: serde_json::Value) -> McpServerResult<ToolResult> {
        let params: ListChannelsParams = serde_json::from_value(args)
            .map_err(|e| McpServerError::InvalidArguments(e.to_string()))?;

        let limit = params.limit.unwrap_or(100).min(200);
        debug!("Listing channels (limit {})", limit);

        let raw = self
            .client
            .list_channels(limit, params.cursor.as_deref())
            .await?;
        let enriched = self.pipeline.process(raw).await;

        Ok(ToolResult::json(&enriched))
    }
}

#[derive(Debug, Deserialize)]
struct ListChannelsParams {
    limit: Option<u32>,
    cursor: Option<String>,
}

/// Tool to fetch recent messages from a channel.
///
/// Message timestamps come back as ISO instants and user IDs carry
/// resolved display names, courtesy of the enrichment pipeline.
pub struct GetChannelHistoryTool {
    client: Arc<SlackClient>,
    pipeline: Arc<EnrichmentPipeline>,
}

impl GetChannelHistoryTool {
    /// Create the tool with shared client and pipeline handles.
    pub fn new(client: Arc<SlackClient>, pipeline: Arc<EnrichmentPipeline>) -> Self {
        Self { client, pipeline }
    }
}

#[async_trait]
impl Tool for GetChannelHistoryTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "slack_get_channel_history",
            "Get recent messages from a channel",
        )
        .with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "channel_id": {
                    "type": "string",
                    "description": "The ID of the channel"
                },
                "limit": {
                    "type": "number",
                    "description": "Number of messages to retrieve (default 10, max 200)",
                    "default": 10
                }
            },
            "required": ["channel_id"]
        }))
    }

    #[instrument(skip(self), fields(tool = "slack_get_channel_history"))]
    async fn execute(&self, args: serde_json::Value) -> McpServerResult<ToolResult> {
        let params: GetChannelHistoryParams = serde_json::from_value(args)
            .map_err(|e| McpServerError::InvalidArguments(e.to_string()))?;

        let limit = params.limit.unwrap_or(10).min(200);
        debug!("Fetching history for {} (limit {})", params.channel_id, limit);

        let raw = self
            .client
            .get_channel_history(&params.channel_id, limit)
            .await?;
        let enriched = self.pipeline.process(raw).await;

        Ok(ToolResult::json(&enriched))
    }
}

#[derive(Debug, Deserialize)]
struct GetChannelHistoryParams {
    channel_id: String,
    limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_channels_limit_clamped() {
        let params: ListChannelsParams =
            serde_json::from_value(serde_json::json!({"limit": 5000})).unwrap();
        assert_eq!(params.limit.unwrap().min(200), 200);
    }

    #[test]
    fn test_history_params_default_limit() {
        let params: GetChannelHistoryParams =
            serde_json::from_value(serde_json::json!({"channel_id": "C1"})).unwrap();
        assert_eq!(params.limit.unwrap_or(10), 10);
    }
}
