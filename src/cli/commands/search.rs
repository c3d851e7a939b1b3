//! Search command - rank documentation pages for a query

use crate::cli::output::{colors, preview_lines};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

const PREVIEW_LINES: usize = 3;
const PREVIEW_LINE_CHARS: usize = 100;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Number of results (defaults to the configured default_k)
    #[arg(long, short = 'k')]
    pub k: Option<usize>,

    /// Only show page URIs (no titles or previews)
    #[arg(long)]
    pub uris_only: bool,
}

/// Search result item
#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub uri: String,
    pub title: String,
    pub score: f64,
}

/// Search response
#[derive(Debug, Serialize)]
pub struct SearchResponseOutput {
    pub query: String,
    pub total_results: usize,
    pub duration_ms: u64,
    pub results: Vec<SearchResultItem>,
}

/// Execute the search command
pub async fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = services.docs.search(&args.query, args.k).await?;

    let output = SearchResponseOutput {
        query: response.query.clone(),
        total_results: response.count,
        duration_ms: response.duration_ms,
        results: response
            .hits
            .iter()
            .enumerate()
            .map(|(i, hit)| SearchResultItem {
                rank: i + 1,
                uri: hit.document.uri.clone(),
                title: hit.document.display_title.clone(),
                score: hit.score,
            })
            .collect(),
    };

    match format {
        OutputFormat::Human => {
            if output.results.is_empty() {
                println!("No results found for '{}'", colors::label(&args.query));
                return Ok(());
            }

            if args.uris_only {
                for result in &output.results {
                    println!("{}", result.uri);
                }
                return Ok(());
            }

            println!(
                "Found {} result(s) for '{}':\n",
                colors::number(&output.total_results.to_string()),
                colors::label(&output.query)
            );

            for (result, hit) in output.results.iter().zip(&response.hits) {
                println!(
                    "[{}] {} {}",
                    colors::rank(&result.rank.to_string()),
                    colors::label(&result.title),
                    colors::dim(&format!("(score: {:.2})", result.score))
                );
                println!("    {}", colors::uri(&result.uri));
                for line in preview_lines(&hit.document.content, PREVIEW_LINES, PREVIEW_LINE_CHARS)
                {
                    println!("    {}", colors::dim(&line));
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
