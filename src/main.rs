//! cleanshot-mcp: MCP server for the CleanShot X URL scheme

use std::sync::Arc;

use anyhow::Result;
use cleanshot_mcp::{dispatch::SystemOpener, mcp::CleanShotMcpServer};
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    // Respects RUST_LOG, default level: info
    // stdout carries the MCP stream, so logs go to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cleanshot_mcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .init();

    info!("cleanshot-mcp server starting...");
    info!("Protocol: Model Context Protocol (MCP)");
    info!("Transport: stdio");

    let opener = SystemOpener::new();
    info!(program = opener.program(), "URL opener initialized");

    let server = CleanShotMcpServer::new(Arc::new(opener));

    info!("Initializing stdio transport...");
    let service = server.serve(stdio()).await?;

    info!("cleanshot-mcp server initialized successfully");
    info!("Client info: {:?}", service.peer_info());
    info!("Waiting for MCP requests...");

    // Blocks until the client disconnects
    service.waiting().await?;

    info!("cleanshot-mcp server shutting down");
    Ok(())
}
