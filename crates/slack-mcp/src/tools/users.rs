//! User tools
//!
//! Tools for listing workspace users and fetching user profiles.

use crate::client::SlackClient;
use crate::enrich::EnrichmentPipeline;
use crate::server::{McpServerError, McpServerResult, Tool};
use crate::types::{ToolDefinition, ToolResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Tool to list users in the workspace.
pub struct GetUsersTool {
    client: Arc<SlackClient>,
    pipeline: Arc<EnrichmentPipeline>,
}

impl GetUsersTool {
    /// Create the tool with shared client and pipeline handles.
    pub fn new(client: Arc<SlackClient>, pipeline: Arc<EnrichmentPipeline>) -> Self {
        Self { client, pipeline }
    }
}

#[async_trait]
impl Tool for GetUsersTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "slack_get_users",
            "List users in the workspace with their basic profile information",
        )
        .with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "number",
                    "description": "Maximum number of users to return (default 100, max 200)",
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

    #[instrument(skip(self), fields(tool = "slack_get_users"))]
    async fn execute(&self, args: serde_json::Value) -> McpServerResult<ToolResult> {
        let params: GetUsersParams = serde_json::from_value(args)
            .map_err(|e| McpServerError::InvalidArguments(e.to_string()))?;

        let limit = params.limit.unwrap_or(100).min(200);
        debug!("Listing users (limit {})", limit);

        let raw = self.client.get_users(limit, params.cursor.as_deref()).await?;
        let enriched = self.pipeline.process(raw).await;

        Ok(ToolResult::json(&enriched))
    }
}

#[derive(Debug, Deserialize)]
struct GetUsersParams {
    limit: Option<u32>,
    cursor: Option<String>,
}

/// Tool to fetch a user's full profile.
pub struct GetUserProfileTool {
    client: Arc<SlackClient>,
    pipeline: Arc<EnrichmentPipeline>,
}

impl GetUserProfileTool {
    /// Create the tool with shared client and pipeline handles.
    pub fn new(client: Arc<SlackClient>, pipeline: Arc<EnrichmentPipeline>) -> Self {
        Self { client, pipeline }
    }
}

#[async_trait]
impl Tool for GetUserProfileTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "slack_get_user_profile",
            "Get a user's detailed profile information",
        )
        .with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "The ID of the user"
                }
            },
            "required": ["user_id"]
        }))
    }

    #[instrument(skip(self), fields(tool = "slack_get_user_profile"))]
    async fn execute(&self, args: serde_json::Value) -> McpServerResult<ToolResult> {
        let params: GetUserProfileParams = serde_json::from_value(args)
            .map_err(|e| McpServerError::InvalidArguments(e.to_string()))?;

        debug!("Fetching profile for {}", params.user_id);

        let raw = self.client.get_user_profile(&params.user_id).await?;
        let enriched = self.pipeline.process(raw).await;

        Ok(ToolResult::json(&enriched))
    }
}

#[derive(Debug, Deserialize)]
struct GetUserProfileParams {
    user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_params_defaults() {
        let params: GetUsersParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.limit.unwrap_or(100), 100);
        assert!(params.cursor.is_none());
    }

    #[test]
    fn test_users_limit_clamped() {
        let params: GetUsersParams =
            serde_json::from_value(serde_json::json!({"limit": 999})).unwrap();
        assert_eq!(params.limit.unwrap().min(200), 200);
    }
}
