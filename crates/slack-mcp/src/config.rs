//! Slack connection configuration.
//!
//! Configuration is loaded from environment variables at startup. The bot
//! token and team ID are required; the process should exit with a diagnostic
//! if either is missing. The API base URL is overridable so tests can point
//! the client at a mock server.

use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Default Slack Web API base URL.
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Slack connection settings for the process lifetime.
///
/// A single credential/workspace pair is global to the process; there is no
/// multi-workspace support.
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Bot token used as a bearer credential on every API call.
    pub bot_token: String,

    /// Workspace (team) ID, passed to endpoints that are team-scoped.
    pub team_id: String,

    /// Base URL of the Slack Web API.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl SlackConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SLACK_BOT_TOKEN`: bot token (required)
    /// - `SLACK_TEAM_ID`: workspace ID (required)
    /// - `SLACK_API_URL`: API base URL (default: <https://slack.com/api>)
    /// - `SLACK_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = std::env::var("SLACK_BOT_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("SLACK_BOT_TOKEN".to_string()))?;
        let team_id = std::env::var("SLACK_TEAM_ID")
            .map_err(|_| ConfigError::MissingEnvVar("SLACK_TEAM_ID".to_string()))?;

        let base_url =
            std::env::var("SLACK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = match std::env::var("SLACK_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SLACK_TIMEOUT_SECS".to_string(),
                message: format!("expected an integer, got {:?}", raw),
            })?,
            Err(_) => 30,
        };

        Ok(Self {
            bot_token,
            team_id,
            base_url,
            timeout_secs,
        })
    }

    /// Build a config pointing at a custom base URL (used by tests).
    pub fn for_base_url(
        base_url: impl Into<String>,
        bot_token: impl Into<String>,
        team_id: impl Into<String>,
    ) -> Self {
        Self {
            bot_token: bot_token.into(),
            team_id: team_id.into(),
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build a full URL by appending an API method to the base URL.
    pub fn url(&self, method: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let method = method.trim_start_matches('/');
        format!("{}/{}", base, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = SlackConfig::for_base_url("https://slack.com/api", "xoxb-test", "T123");

        assert_eq!(
            config.url("conversations.list"),
            "https://slack.com/api/conversations.list"
        );
        assert_eq!(
            config.url("/conversations.list"),
            "https://slack.com/api/conversations.list"
        );
    }

    #[test]
    fn test_url_joining_trailing_slash() {
        let config = SlackConfig::for_base_url("https://slack.com/api/", "xoxb-test", "T123");

        assert_eq!(
            config.url("users.info"),
            "https://slack.com/api/users.info"
        );
    }

    #[test]
    fn test_missing_env_var_message() {
        let err = ConfigError::MissingEnvVar("SLACK_BOT_TOKEN".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: SLACK_BOT_TOKEN"
        );
    }

    #[test]
    fn test_timeout() {
        let config = SlackConfig::for_base_url("https://slack.com/api", "xoxb-test", "T123");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }
}
