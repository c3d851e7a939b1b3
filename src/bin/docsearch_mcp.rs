//! docsearch MCP (Model Context Protocol) server
//!
//! A stdio-based MCP server exposing documentation search as tools
//! for MCP clients.

use docsearch::core::config::Config;
use docsearch::core::services::Services;
use docsearch::core::xdg::XdgDirs;
use docsearch::mcp::McpServer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // stdout carries the protocol
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let xdg = XdgDirs::new();
    xdg.log_paths();
    if let Err(e) = xdg.ensure_dirs_exist() {
        eprintln!("Failed to create XDG directories: {e}");
        std::process::exit(1);
    }

    let config = Config::load_with_xdg(&xdg).unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::process::exit(1);
    });
    config.log_config();

    let services = Services::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to initialize services: {e}");
        std::process::exit(1);
    });
    let services = Arc::new(services);

    // Warm the index in the background so the first query is fast
    let docs = Arc::clone(&services.docs);
    tokio::spawn(async move {
        if let Err(e) = docs.ensure_built().await {
            tracing::warn!("Initial index build failed: {}", e);
        }
    });

    let mut server = McpServer::new(services);

    if let Err(e) = server.run().await {
        eprintln!("MCP server error: {e}");
        std::process::exit(1);
    }
}
