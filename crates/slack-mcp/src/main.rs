//! Slack MCP server binary.
//!
//! Reads line-delimited JSON-RPC requests on stdin and writes one response
//! per line on stdout. Logs go to stderr so the protocol stream stays
//! clean. Missing Slack credentials are fatal at startup; everything after
//! that degrades per-request.

use slack_mcp::{
    slack_tools, EnrichmentPipeline, IdentityResolver, McpError, McpRequest, McpResponse,
    McpServer, RequestId, SlackClient, SlackConfig,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match SlackConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("slack-mcp: {}", err);
            std::process::exit(1);
        }
    };

    let client = Arc::new(SlackClient::new(config));
    let resolver = Arc::new(IdentityResolver::new(client.clone()));
    let pipeline = Arc::new(EnrichmentPipeline::new(resolver));

    let server = McpServer::new("slack-mcp", env!("CARGO_PKG_VERSION"));
    server.register_tools(slack_tools(client, pipeline)).await;

    info!(
        "Slack MCP server started with {} tools",
        server.list_tools().await.len()
    );

    if let Err(err) = run_stdio(&server).await {
        eprintln!("slack-mcp: transport error: {}", err);
        std::process::exit(1);
    }
}

/// Serve requests over stdin/stdout until EOF.
async fn run_stdio(server: &McpServer) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => {
                debug!("Handling {} request", request.method);
                server.handle_request(request).await
            }
            Err(err) => {
                // Notifications carry no id and expect no reply.
                if is_notification(line) {
                    continue;
                }
                warn!("Unparseable request: {}", err);
                McpResponse::error(RequestId::Null, McpError::parse_error())
            }
        };

        let mut serialized = serde_json::to_string(&response)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        serialized.push('\n');
        stdout.write_all(serialized.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// Whether a raw message is a JSON-RPC notification (no `id` field).
fn is_notification(line: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(line)
        .map(|v| v.get("id").is_none() && v.get("method").is_some())
        .unwrap_or(false)
}
