//! docsearch CLI - command-line interface for documentation search
//!
//! # Examples
//!
//! ```bash
//! # Search the docs
//! docsearch search "stdio transport" -k 3
//!
//! # Read a page
//! docsearch fetch https://modelcontextprotocol.io/docs/concepts/tools
//!
//! # Force a fresh fetch of every page
//! docsearch rebuild --refresh
//!
//! # Show configuration
//! docsearch show-config --format json
//! ```

use clap::Parser;
use docsearch::cli::output::print_error;
use docsearch::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
