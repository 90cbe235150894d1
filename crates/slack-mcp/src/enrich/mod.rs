//! Response normalization and enrichment pipeline.
//!
//! Raw Slack payloads carry epoch-seconds timestamps and opaque user IDs.
//! Before a tool result is handed back to the caller, the payload is run
//! through two structural transforms:
//!
//! 1. [`timestamp::normalize_timestamps`] rewrites timestamp fields into
//!    ISO-8601 instants.
//! 2. [`enricher::ResponseEnricher`] attaches resolved display names next
//!    to `user` fields, using the single-flight [`identity::IdentityResolver`].
//!
//! Both transforms are additive or value-preserving: they never remove or
//! rename an existing field, and they leave array/object structure intact.

pub mod enricher;
pub mod identity;
pub mod timestamp;

pub use enricher::ResponseEnricher;
pub use identity::{IdentityRecord, IdentityResolver};
pub use timestamp::normalize_timestamps;

use serde_json::Value;
use std::sync::Arc;

/// The full normalize-then-enrich pipeline applied to every tool result.
pub struct EnrichmentPipeline {
    enricher: ResponseEnricher,
}

impl EnrichmentPipeline {
    /// Create a pipeline backed by the given resolver.
    pub fn new(resolver: Arc<IdentityResolver>) -> Self {
        Self {
            enricher: ResponseEnricher::new(resolver),
        }
    }

    /// Normalize timestamps, then enrich user identifiers.
    pub async fn process(&self, raw: Value) -> Value {
        let normalized = normalize_timestamps(raw);
        self.enricher.enrich(normalized).await
    }
}
