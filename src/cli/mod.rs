//! CLI adapter for docsearch
//!
//! Command-line access to the same search and fetch operations the MCP
//! server exposes. This module is parallel to `mcp/`: both depend on
//! `core/` but not on each other.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// docsearch - BM25 documentation search
///
/// Builds an in-memory index over documentation pages and ranks them
/// against keyword queries.
#[derive(Parser, Debug)]
#[command(name = "docsearch")]
#[command(version)]
#[command(about = "BM25 documentation search", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search documentation with BM25 ranking
    Search(commands::SearchArgs),

    /// Print the full text of a page
    Fetch(commands::FetchArgs),

    /// Rebuild the index, optionally bypassing the page cache
    Rebuild(commands::RebuildArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  docsearch completions bash > ~/.local/share/bash-completion/completions/docsearch
    ///   zsh:   docsearch completions zsh > ~/.zfunc/_docsearch
    ///   fish:  docsearch completions fish > ~/.config/fish/completions/docsearch.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Completions need no services
    let command = match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        command => command,
    };

    let xdg = XdgDirs::new();
    if let Err(e) = xdg.ensure_dirs_exist() {
        output::print_warning(&format!("Could not create XDG directories: {e}"));
    }

    let config = Config::load_with_xdg(&xdg)?;
    let services = Arc::new(Services::new(config)?);

    match command {
        Commands::Search(args) => commands::search::execute(args, &services, cli.format).await,
        Commands::Fetch(args) => commands::fetch::execute(args, &services, cli.format).await,
        Commands::Rebuild(args) => commands::rebuild::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => {
            commands::config::execute(args, &services, &xdg, cli.format).await
        }
        Commands::Completions(_) => Ok(()),
    }
}
