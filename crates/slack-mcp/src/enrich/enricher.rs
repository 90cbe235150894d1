//! Response enrichment.
//!
//! Walks a response payload depth-first and, for every object carrying a
//! `user` field that holds a Slack user ID, attaches two sibling fields
//! with the resolved identity: `user_display_name` and `user_username`.
//! The walk is purely additive: existing fields are never removed,
//! renamed, or reordered, and every child is recursed into whether or not
//! the current object was enriched, so nested messages inside threads and
//! search results are each enriched individually.

use super::identity::IdentityResolver;
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Field inspected for user identifiers.
const USER_FIELD: &str = "user";

/// Fields added next to a recognized user identifier.
const DISPLAY_NAME_FIELD: &str = "user_display_name";
const USERNAME_FIELD: &str = "user_username";

/// Whether a string has the shape of a Slack user ID (`U.../W...` followed
/// by uppercase alphanumerics). IDs are opaque; this only gates the lookup.
fn is_user_id(value: &str) -> bool {
    let mut chars = value.chars();
    matches!(chars.next(), Some('U') | Some('W'))
        && value.len() >= 2
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

/// Attaches resolved identity fields to payloads.
pub struct ResponseEnricher {
    resolver: Arc<IdentityResolver>,
}

impl ResponseEnricher {
    /// Create an enricher backed by the given resolver.
    pub fn new(resolver: Arc<IdentityResolver>) -> Self {
        Self { resolver }
    }

    /// Enrich a payload, resolving user IDs into display names.
    pub async fn enrich(&self, value: Value) -> Value {
        self.enrich_value(value).await
    }

    // Async recursion over an arbitrarily deep tree needs boxing.
    fn enrich_value<'a>(
        &'a self,
        value: Value,
    ) -> Pin<Box<dyn Future<Output = Value> + Send + 'a>> {
        Box::pin(async move {
            match value {
                Value::Array(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for item in items {
                        out.push(self.enrich_value(item).await);
                    }
                    Value::Array(out)
                }
                Value::Object(map) => self.enrich_object(map).await,
                other => other,
            }
        })
    }

    async fn enrich_object(&self, map: Map<String, Value>) -> Value {
        let user_id = map
            .get(USER_FIELD)
            .and_then(Value::as_str)
            .filter(|id| is_user_id(id))
            .map(str::to_string);

        let already_enriched =
            map.contains_key(DISPLAY_NAME_FIELD) || map.contains_key(USERNAME_FIELD);

        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            out.insert(key, self.enrich_value(value).await);
        }

        if let Some(user_id) = user_id {
            if !already_enriched {
                let record = self.resolver.resolve(&user_id).await;
                out.insert(
                    DISPLAY_NAME_FIELD.to_string(),
                    Value::String(record.display_name),
                );
                out.insert(USERNAME_FIELD.to_string(), Value::String(record.username));
            }
        }

        Value::Object(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_shape() {
        assert!(is_user_id("U123"));
        assert!(is_user_id("W0AB12CD3"));
        assert!(!is_user_id("U"));
        assert!(!is_user_id("u123"));
        assert!(!is_user_id("C0123456"));
        assert!(!is_user_id("U123-bot"));
        assert!(!is_user_id("alice"));
        assert!(!is_user_id(""));
    }
}
