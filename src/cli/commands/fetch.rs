//! Fetch command - print the full text of a page

use crate::cli::output::{colors, print_header};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Page URI, as shown in search results
    pub uri: String,
}

/// Execute the fetch command
pub async fn execute(
    args: FetchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = services.docs.fetch_document(&args.uri).await?;

    match format {
        OutputFormat::Human => {
            print_header(&document.display_title);
            println!("{}\n", colors::uri(&document.uri));
            println!("{}", document.content);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}
