//! Message tools
//!
//! Tools for posting messages, replying in threads, adding reactions, and
//! reading thread replies.

use crate::client::SlackClient;
use crate::enrich::EnrichmentPipeline;
use crate::server::{McpServerError, McpServerResult, Tool};
use crate::types::{ToolDefinition, ToolResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Tool to post a new message to a channel.
pub struct PostMessageTool {
    client: Arc<SlackClient>,
    pipeline: Arc<EnrichmentPipeline>,
}

impl PostMessageTool {
    /// Create the tool with shared client and pipeline handles.
    pub fn new(client: Arc<SlackClient>, pipeline: Arc<EnrichmentPipeline>) -> Self {
        Self { client, pipeline }
    }
}

#[async_trait]
impl Tool for PostMessageTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("slack_post_message", "Post a new message to a channel").with_schema(
            serde_json::json!({
                "type": "object",
                "properties": {
                    "channel_id": {
                        "type": "string",
                        "description": "The ID of the channel to post to"
                    },
                    "text": {
                        "type": "string",
                        "description": "The message text to post"
                    }
                },
                "required": ["channel_id", "text"]
            }),
        )
    }

    #[instrument(skip(self, args), fields(tool = "slack_post_message"))]
    async fn execute(&self, args: serde_json::Value) -> McpServerResult<ToolResult> {
        let params: PostMessageParams = serde_json::from_value(args)
            .map_err(|e| McpServerError::InvalidArguments(e.to_string()))?;

        debug!("Posting message to {}", params.channel_id);

        let raw = self
            .client
            .post_message(&params.channel_id, &params.text)
            .await?;
        let enriched = self.pipeline.process(raw).await;

        Ok(ToolResult::json(&enriched))
    }
}

#[derive(Debug, Deserialize)]
struct PostMessageParams {
    channel_id: String,
    text: String,
}

/// Tool to reply to an existing message thread.
pub struct ReplyToThreadTool {
    client: Arc<SlackClient>,
    pipeline: Arc<EnrichmentPipeline>,
}

impl ReplyToThreadTool {
    /// Create the tool with shared client and pipeline handles.
    pub fn new(client: Arc<SlackClient>, pipeline: Arc<EnrichmentPipeline>) -> Self {
        Self { client, pipeline }
    }
}

#[async_trait]
impl Tool for ReplyToThreadTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("slack_reply_to_thread", "Reply to a message thread").with_schema(
            serde_json::json!({
                "type": "object",
                "properties": {
                    "channel_id": {
                        "type": "string",
                        "description": "The ID of the channel containing the thread"
                    },
                    "thread_ts": {
                        "type": "string",
                        "description": "Timestamp of the parent message, in Slack's epoch format"
                    },
                    "text": {
                        "type": "string",
                        "description": "The reply text"
                    }
                },
                "required": ["channel_id", "thread_ts", "text"]
            }),
        )
    }

    #[instrument(skip(self, args), fields(tool = "slack_reply_to_thread"))]
    async fn execute(&self, args: serde_json::Value) -> McpServerResult<ToolResult> {
        let params: ReplyToThreadParams = serde_json::from_value(args)
            .map_err(|e| McpServerError::InvalidArguments(e.to_string()))?;

        debug!(
            "Replying to thread {} in {}",
            params.thread_ts, params.channel_id
        );

        let raw = self
            .client
            .reply_to_thread(&params.channel_id, &params.thread_ts, &params.text)
            .await?;
        let enriched = self.pipeline.process(raw).await;

        Ok(ToolResult::json(&enriched))
    }
}

#[derive(Debug, Deserialize)]
struct ReplyToThreadParams {
    channel_id: String,
    thread_ts: String,
    text: String,
}

/// Tool to add an emoji reaction to a message.
pub struct AddReactionTool {
    client: Arc<SlackClient>,
    pipeline: Arc<EnrichmentPipeline>,
}

impl AddReactionTool {
    /// Create the tool with shared client and pipeline handles.
    pub fn new(client: Arc<SlackClient>, pipeline: Arc<EnrichmentPipeline>) -> Self {
        Self { client, pipeline }
    }
}

#[async_trait]
impl Tool for AddReactionTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new("slack_add_reaction", "Add an emoji reaction to a message")
            .with_schema(serde_json::json!({
                "type": "object",
                "properties": {
                    "channel_id": {
                        "type": "string",
                        "description": "The ID of the channel containing the message"
                    },
                    "timestamp": {
                        "type": "string",
                        "description": "Timestamp of the message to react to"
                    },
                    "reaction": {
                        "type": "string",
                        "description": "Emoji name without colons"
                    }
                },
                "required": ["channel_id", "timestamp", "reaction"]
            }))
    }

    #[instrument(skip(self), fields(tool = "slack_add_reaction"))]
    async fn execute(&self, args: serde_json::Value) -> McpServerResult<ToolResult> {
        let params: AddReactionParams = serde_json::from_value(args)
            .map_err(|e| McpServerError::InvalidArguments(e.to_string()))?;

        debug!("Adding :{}: in {}", params.reaction, params.channel_id);

        let raw = self
            .client
            .add_reaction(&params.channel_id, &params.timestamp, &params.reaction)
            .await?;
        let enriched = self.pipeline.process(raw).await;

        Ok(ToolResult::json(&enriched))
    }
}

#[derive(Debug, Deserialize)]
struct AddReactionParams {
    channel_id: String,
    timestamp: String,
    reaction: String,
}

/// Tool to fetch all replies in a message thread.
pub struct GetThreadRepliesTool {
    client: Arc<SlackClient>,
    pipeline: Arc<EnrichmentPipeline>,
}

impl GetThreadRepliesTool {
    /// Create the tool with shared client and pipeline handles.
    pub fn new(client: Arc<SlackClient>, pipeline: Arc<EnrichmentPipeline>) -> Self {
        Self { client, pipeline }
    }
}

#[async_trait]
impl Tool for GetThreadRepliesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "slack_get_thread_replies",
            "Get all replies in a message thread",
        )
        .with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "channel_id": {
                    "type": "string",
                    "description": "The ID of the channel containing the thread"
                },
                "thread_ts": {
                    "type": "string",
                    "description": "Timestamp of the parent message, in Slack's epoch format"
                }
            },
            "required": ["channel_id", "thread_ts"]
        }))
    }

    #[instrument(skip(self), fields(tool = "slack_get_thread_replies"))]
    async fn execute(&self, args: serde_json::Value) -> McpServerResult<ToolResult> {
        let params: GetThreadRepliesParams = serde_json::from_value(args)
            .map_err(|e| McpServerError::InvalidArguments(e.to_string()))?;

        debug!(
            "Fetching thread {} from {}",
            params.thread_ts, params.channel_id
        );

        let raw = self
            .client
            .get_thread_replies(&params.channel_id, &params.thread_ts)
            .await?;
        let enriched = self.pipeline.process(raw).await;

        Ok(ToolResult::json(&enriched))
    }
}

#[derive(Debug, Deserialize)]
struct GetThreadRepliesParams {
    channel_id: String,
    thread_ts: String,
}
