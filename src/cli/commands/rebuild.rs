//! Rebuild command - rebuild the index and report build statistics

use crate::cli::output::{colors, format_duration_ms, print_success};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the rebuild command
#[derive(Args, Debug)]
pub struct RebuildArgs {
    /// Ignore cached pages and fetch every source again
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Debug, Serialize)]
pub struct RebuildOutput {
    pub documents_indexed: usize,
    pub pages_skipped: usize,
    pub from_cache: bool,
    pub vocabulary: usize,
    pub average_length: f64,
    pub duration_ms: u64,
}

/// Execute the rebuild command
pub async fn execute(
    args: RebuildArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let build = services.docs.rebuild(args.refresh).await?;
    let stats = services.docs.stats().await;

    let output = RebuildOutput {
        documents_indexed: build.documents_indexed,
        pages_skipped: build.pages_skipped,
        from_cache: build.from_cache,
        vocabulary: stats.vocabulary,
        average_length: stats.average_length,
        duration_ms: build.duration_ms,
    };

    match format {
        OutputFormat::Human => {
            print_success(&format!(
                "Indexed {} page(s) in {}",
                output.documents_indexed,
                format_duration_ms(output.duration_ms)
            ));
            println!(
                "  source:         {}",
                if output.from_cache { "page cache" } else { "network/local" }
            );
            println!(
                "  skipped:        {}",
                colors::number(&output.pages_skipped.to_string())
            );
            println!(
                "  vocabulary:     {}",
                colors::number(&output.vocabulary.to_string())
            );
            println!(
                "  average length: {}",
                colors::number(&format!("{:.1}", output.average_length))
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
