//! # Slack MCP
//!
//! This crate provides an MCP (Model Context Protocol) server that exposes
//! the Slack Web API as tools an AI assistant can call to read and post
//! messages on a user's behalf.
//!
//! ## Overview
//!
//! The slack-mcp crate handles:
//! - **Tools**: the Slack tool catalog (channels, messages, users, search)
//! - **Gateway**: an HTTP client for the Slack Web API
//! - **Enrichment**: normalization of raw API payloads before they reach
//!   the caller
//! - **JSON-RPC**: the MCP protocol over a line-delimited stdio transport
//!
//! ## Enrichment pipeline
//!
//! Raw Slack payloads are awkward for both humans and models: instants are
//! epoch-seconds strings (`"1700000000.123456"`) and people are opaque IDs
//! (`"U0123AB"`). Every tool result passes through a two-stage pipeline:
//!
//! 1. **Timestamp normalization** rewrites every `ts`-convention field
//!    holding a numeric string into an ISO-8601 instant. The transform is
//!    idempotent and leaves malformed values untouched.
//! 2. **Identity enrichment** walks the payload and, next to every `user`
//!    field holding a user ID, adds `user_display_name` and
//!    `user_username` resolved via `users.info`. Lookups are cached for
//!    the process lifetime and coalesced so concurrent requests for the
//!    same ID share one upstream call. A failed lookup degrades to the raw
//!    ID and is retried on the next occurrence rather than cached.
//!
//! Both stages are non-destructive: no existing field is ever removed,
//! renamed, or reordered.
//!
//! ## Available tools
//!
//! - `slack_list_channels`: list public channels
//! - `slack_post_message`: post a message to a channel
//! - `slack_reply_to_thread`: reply to a message thread
//! - `slack_add_reaction`: add an emoji reaction
//! - `slack_get_channel_history`: fetch recent channel messages
//! - `slack_get_thread_replies`: fetch all replies in a thread
//! - `slack_get_users`: list workspace users
//! - `slack_get_user_profile`: fetch a user's profile
//! - `slack_search_messages`: search messages across the workspace
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slack_mcp::{
//!     EnrichmentPipeline, IdentityResolver, McpServer, SlackClient, SlackConfig, slack_tools,
//! };
//! use std::sync::Arc;
//!
//! async fn setup() {
//!     let config = SlackConfig::from_env().expect("missing Slack credentials");
//!     let client = Arc::new(SlackClient::new(config));
//!     let resolver = Arc::new(IdentityResolver::new(client.clone()));
//!     let pipeline = Arc::new(EnrichmentPipeline::new(resolver));
//!
//!     let server = McpServer::new("slack-mcp", env!("CARGO_PKG_VERSION"));
//!     server.register_tools(slack_tools(client, pipeline)).await;
//!
//!     let tools = server.list_tools().await;
//!     println!("Registered {} tools", tools.len());
//! }
//! ```

pub mod client;
pub mod config;
pub mod enrich;
pub mod server;
pub mod tools;
pub mod types;

// Re-export main types
pub use client::{SlackClient, SlackError};
pub use config::{ConfigError, SlackConfig};
pub use enrich::{
    normalize_timestamps, EnrichmentPipeline, IdentityRecord, IdentityResolver, ResponseEnricher,
};
pub use server::{McpServer, McpServerError, McpServerResult, Tool};
pub use types::{
    ContentBlock, McpError, McpRequest, McpResponse, RequestId, ServerCapabilities, ServerInfo,
    ToolCall, ToolDefinition, ToolResult,
};

// Re-export the tool catalog
pub use tools::slack_tools;
