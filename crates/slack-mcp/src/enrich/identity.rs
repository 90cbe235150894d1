//! Identity resolution with single-flight caching.
//!
//! Slack payloads reference people by opaque IDs (`U...`/`W...`). The
//! resolver turns an ID into a display name and username via `users.info`,
//! memoizing results for the process lifetime. Concurrent lookups for the
//! same ID are coalesced: the cache holds one `OnceCell` per identifier, so
//! at most one upstream call is in flight per ID and later callers await
//! its outcome. Failed lookups leave the cell unset, so a later resolve
//! retries instead of pinning the failure.

use crate::client::{SlackClient, SlackError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Resolved human-readable identity for a user ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    /// Preferred display name.
    pub display_name: String,

    /// Handle/username.
    pub username: String,
}

impl IdentityRecord {
    /// Degraded record used when a lookup fails: both fields fall back to
    /// the raw identifier.
    pub fn degraded(user_id: &str) -> Self {
        Self {
            display_name: user_id.to_string(),
            username: user_id.to_string(),
        }
    }
}

/// Process-wide user identity resolver.
///
/// The cache is unbounded and never evicted; entries stay valid for the
/// process lifetime.
pub struct IdentityResolver {
    client: Arc<SlackClient>,
    cache: Mutex<HashMap<String, Arc<OnceCell<IdentityRecord>>>>,
}

impl IdentityResolver {
    /// Create a resolver backed by the given client, with an empty cache.
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self {
            client,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a user ID to an identity record.
    ///
    /// Never fails: lookup errors are logged and degraded to a record
    /// carrying the raw ID in both fields. Only successful lookups are
    /// cached.
    pub async fn resolve(&self, user_id: &str) -> IdentityRecord {
        let cell = {
            let mut cache = self.cache.lock().expect("identity cache poisoned");
            Arc::clone(cache.entry(user_id.to_string()).or_default())
        };

        match cell.get_or_try_init(|| self.lookup(user_id)).await {
            Ok(record) => record.clone(),
            Err(err) => {
                warn!("Identity lookup for {} failed: {}", user_id, err);
                IdentityRecord::degraded(user_id)
            }
        }
    }

    /// Fetch and parse a user record from `users.info`.
    async fn lookup(&self, user_id: &str) -> Result<IdentityRecord, SlackError> {
        debug!("Resolving identity for {}", user_id);

        let payload = self.client.get_user_info(user_id).await?;

        if payload.get("ok").and_then(Value::as_bool) != Some(true) {
            let reason = payload
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(SlackError::InvalidResponse(format!(
                "users.info failed for {}: {}",
                user_id, reason
            )));
        }

        let user = payload
            .get("user")
            .ok_or_else(|| SlackError::InvalidResponse("users.info missing user".to_string()))?;
        let profile = user.get("profile");

        let display_name = non_empty(profile.and_then(|p| p.get("display_name")))
            .or_else(|| non_empty(profile.and_then(|p| p.get("real_name"))))
            .or_else(|| non_empty(user.get("real_name")))
            .or_else(|| non_empty(user.get("name")))
            .unwrap_or_else(|| user_id.to_string());

        let username =
            non_empty(user.get("name")).unwrap_or_else(|| user_id.to_string());

        Ok(IdentityRecord {
            display_name,
            username,
        })
    }
}

/// Extract a non-empty string value.
fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_degraded_record() {
        let record = IdentityRecord::degraded("U123");
        assert_eq!(record.display_name, "U123");
        assert_eq!(record.username, "U123");
    }

    #[test]
    fn test_non_empty() {
        let value = json!({"name": "alice", "blank": ""});
        assert_eq!(non_empty(value.get("name")), Some("alice".to_string()));
        assert_eq!(non_empty(value.get("blank")), None);
        assert_eq!(non_empty(value.get("missing")), None);
        assert_eq!(non_empty(Some(&json!(42))), None);
    }
}
