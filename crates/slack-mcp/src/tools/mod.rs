//! Slack MCP tools
//!
//! The tool catalog exposed to AI assistants. Every tool holds a handle to
//! the shared Slack client and the enrichment pipeline; raw API payloads
//! are normalized and enriched before being returned.

pub mod channels;
pub mod messages;
pub mod search;
pub mod users;

pub use channels::{GetChannelHistoryTool, ListChannelsTool};
pub use messages::{AddReactionTool, GetThreadRepliesTool, PostMessageTool, ReplyToThreadTool};
pub use search::SearchMessagesTool;
pub use users::{GetUserProfileTool, GetUsersTool};

use crate::client::SlackClient;
use crate::enrich::EnrichmentPipeline;
use crate::server::Tool;
use std::sync::Arc;

/// Build the full Slack tool catalog, in its canonical listing order.
pub fn slack_tools(
    client: Arc<SlackClient>,
    pipeline: Arc<EnrichmentPipeline>,
) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(ListChannelsTool::new(client.clone(), pipeline.clone())),
        Arc::new(PostMessageTool::new(client.clone(), pipeline.clone())),
        Arc::new(ReplyToThreadTool::new(client.clone(), pipeline.clone())),
        Arc::new(AddReactionTool::new(client.clone(), pipeline.clone())),
        Arc::new(GetChannelHistoryTool::new(client.clone(), pipeline.clone())),
        Arc::new(GetThreadRepliesTool::new(client.clone(), pipeline.clone())),
        Arc::new(GetUsersTool::new(client.clone(), pipeline.clone())),
        Arc::new(GetUserProfileTool::new(client.clone(), pipeline.clone())),
        Arc::new(SearchMessagesTool::new(client, pipeline)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlackConfig;
    use crate::enrich::IdentityResolver;

    fn catalog() -> Vec<Arc<dyn Tool>> {
        let config = SlackConfig::for_base_url("http://localhost:3000", "xoxb-test", "T123");
        let client = Arc::new(SlackClient::new(config));
        let resolver = Arc::new(IdentityResolver::new(client.clone()));
        let pipeline = Arc::new(EnrichmentPipeline::new(resolver));
        slack_tools(client, pipeline)
    }

    #[test]
    fn test_catalog_order() {
        let names: Vec<String> = catalog().iter().map(|t| t.definition().name).collect();
        assert_eq!(
            names,
            vec![
                "slack_list_channels",
                "slack_post_message",
                "slack_reply_to_thread",
                "slack_add_reaction",
                "slack_get_channel_history",
                "slack_get_thread_replies",
                "slack_get_users",
                "slack_get_user_profile",
                "slack_search_messages",
            ]
        );
    }

    #[test]
    fn test_required_arguments_per_tool() {
        for tool in catalog() {
            let def = tool.definition();
            let required = def.required_arguments();
            match def.name.as_str() {
                "slack_list_channels" | "slack_get_users" => assert!(required.is_empty()),
                "slack_post_message" => assert_eq!(required, vec!["channel_id", "text"]),
                "slack_reply_to_thread" => {
                    assert_eq!(required, vec!["channel_id", "thread_ts", "text"])
                }
                "slack_add_reaction" => {
                    assert_eq!(required, vec!["channel_id", "timestamp", "reaction"])
                }
                "slack_get_channel_history" => assert_eq!(required, vec!["channel_id"]),
                "slack_get_thread_replies" => assert_eq!(required, vec!["channel_id", "thread_ts"]),
                "slack_get_user_profile" => assert_eq!(required, vec!["user_id"]),
                "slack_search_messages" => assert_eq!(required, vec!["query"]),
                other => panic!("unexpected tool {}", other),
            }
        }
    }
}
