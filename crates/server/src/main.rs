//! mcp-tube server entry point.
//!
//! Boots the MCP server on stdio transport. Logging goes to stderr to avoid
//! interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;
use tubex_client::TubeClient;
use tubex_core::AppConfig;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    tracing::info!(base_url = %config.base_url, "Starting mcp-tube server on stdio transport");

    let client = TubeClient::new(config)?;
    let handler = handler::McpTubeServer::new(client);
    let server = serve_server(handler, stdio()).await?;

    server.waiting().await?;

    Ok(())
}
