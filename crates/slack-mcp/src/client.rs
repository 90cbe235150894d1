//! Slack Web API client.
//!
//! Thin HTTP gateway over the Slack Web API. Every method returns the raw
//! JSON payload from Slack; the caller runs it through the enrichment
//! pipeline. Application-level failures (`ok: false` bodies) are returned
//! unchanged with the rest of the payload, only transport-level problems
//! surface as errors.

use crate::config::SlackConfig;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Slack client errors.
#[derive(Debug, Error)]
pub enum SlackError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned a non-success HTTP status.
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Response body was not valid JSON.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

/// Slack Web API client.
#[derive(Clone)]
pub struct SlackClient {
    /// HTTP client instance.
    client: Client,

    /// Connection settings (token, team, base URL).
    config: SlackConfig,
}

impl SlackClient {
    /// Create a new Slack client from connection settings.
    pub fn new(config: SlackConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// List channels in the workspace.
    #[instrument(skip(self))]
    pub async fn list_channels(
        &self,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<Value, SlackError> {
        debug!("Listing up to {} channels", limit);

        let mut query = vec![
            ("types".to_string(), "public_channel".to_string()),
            ("exclude_archived".to_string(), "true".to_string()),
            ("limit".to_string(), limit.to_string()),
            ("team_id".to_string(), self.config.team_id.clone()),
        ];
        if let Some(cursor) = cursor {
            query.push(("cursor".to_string(), cursor.to_string()));
        }

        self.get("conversations.list", &query).await
    }

    /// Post a message to a channel.
    #[instrument(skip(self, text), fields(channel = %channel_id))]
    pub async fn post_message(&self, channel_id: &str, text: &str) -> Result<Value, SlackError> {
        debug!("Posting message to {}", channel_id);

        self.post(
            "chat.postMessage",
            &serde_json::json!({
                "channel": channel_id,
                "text": text,
            }),
        )
        .await
    }

    /// Reply to a message thread.
    #[instrument(skip(self, text), fields(channel = %channel_id, thread_ts = %thread_ts))]
    pub async fn reply_to_thread(
        &self,
        channel_id: &str,
        thread_ts: &str,
        text: &str,
    ) -> Result<Value, SlackError> {
        debug!("Replying to thread {} in {}", thread_ts, channel_id);

        self.post(
            "chat.postMessage",
            &serde_json::json!({
                "channel": channel_id,
                "thread_ts": thread_ts,
                "text": text,
            }),
        )
        .await
    }

    /// Add an emoji reaction to a message.
    #[instrument(skip(self), fields(channel = %channel_id))]
    pub async fn add_reaction(
        &self,
        channel_id: &str,
        timestamp: &str,
        reaction: &str,
    ) -> Result<Value, SlackError> {
        debug!("Adding reaction :{}: in {}", reaction, channel_id);

        self.post(
            "reactions.add",
            &serde_json::json!({
                "channel": channel_id,
                "timestamp": timestamp,
                "name": reaction,
            }),
        )
        .await
    }

    /// Fetch recent messages from a channel.
    #[instrument(skip(self), fields(channel = %channel_id))]
    pub async fn get_channel_history(
        &self,
        channel_id: &str,
        limit: u32,
    ) -> Result<Value, SlackError> {
        debug!("Fetching {} messages from {}", limit, channel_id);

        let query = vec![
            ("channel".to_string(), channel_id.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];

        self.get("conversations.history", &query).await
    }

    /// Fetch all replies in a message thread.
    #[instrument(skip(self), fields(channel = %channel_id, thread_ts = %thread_ts))]
    pub async fn get_thread_replies(
        &self,
        channel_id: &str,
        thread_ts: &str,
    ) -> Result<Value, SlackError> {
        debug!("Fetching thread {} from {}", thread_ts, channel_id);

        let query = vec![
            ("channel".to_string(), channel_id.to_string()),
            ("ts".to_string(), thread_ts.to_string()),
        ];

        self.get("conversations.replies", &query).await
    }

    /// List users in the workspace.
    #[instrument(skip(self))]
    pub async fn get_users(&self, limit: u32, cursor: Option<&str>) -> Result<Value, SlackError> {
        debug!("Listing up to {} users", limit);

        let mut query = vec![
            ("limit".to_string(), limit.to_string()),
            ("team_id".to_string(), self.config.team_id.clone()),
        ];
        if let Some(cursor) = cursor {
            query.push(("cursor".to_string(), cursor.to_string()));
        }

        self.get("users.list", &query).await
    }

    /// Fetch a user's profile.
    #[instrument(skip(self), fields(user = %user_id))]
    pub async fn get_user_profile(&self, user_id: &str) -> Result<Value, SlackError> {
        debug!("Fetching profile for {}", user_id);

        let query = vec![
            ("user".to_string(), user_id.to_string()),
            ("include_labels".to_string(), "true".to_string()),
        ];

        self.get("users.profile.get", &query).await
    }

    /// Fetch a user record, used by the identity resolver.
    #[instrument(skip(self), fields(user = %user_id))]
    pub async fn get_user_info(&self, user_id: &str) -> Result<Value, SlackError> {
        debug!("Fetching user info for {}", user_id);

        let query = vec![("user".to_string(), user_id.to_string())];

        self.get("users.info", &query).await
    }

    /// Search messages across the workspace.
    #[instrument(skip(self), fields(query = %search_query))]
    pub async fn search_messages(
        &self,
        search_query: &str,
        count: u32,
        page: u32,
    ) -> Result<Value, SlackError> {
        debug!("Searching messages: {}", search_query);

        let query = vec![
            ("query".to_string(), search_query.to_string()),
            ("count".to_string(), count.to_string()),
            ("page".to_string(), page.to_string()),
        ];

        self.get("search.messages", &query).await
    }

    /// Issue a GET request with a bearer header and query parameters.
    async fn get(&self, method: &str, query: &[(String, String)]) -> Result<Value, SlackError> {
        let url = self.config.url(method);
        let response = self
            .client
            .get(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.bot_token),
            )
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Issue a POST request with a bearer header and a JSON body.
    async fn post(&self, method: &str, body: &Value) -> Result<Value, SlackError> {
        let url = self.config.url(method);
        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.bot_token),
            )
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle an API response and parse the JSON body.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value, SlackError> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Slack API error ({}): {}", status.as_u16(), message);
            return Err(SlackError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SlackError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlackConfig;

    #[test]
    fn test_client_creation() {
        let config = SlackConfig::for_base_url("http://localhost:3000", "xoxb-test", "T123");
        let client = SlackClient::new(config);
        assert_eq!(
            client.config.url("users.info"),
            "http://localhost:3000/users.info"
        );
    }

    #[test]
    fn test_error_display() {
        let err = SlackError::ApiError {
            status: 429,
            message: "ratelimited".to_string(),
        };
        assert_eq!(err.to_string(), "API error (429): ratelimited");
    }
}
