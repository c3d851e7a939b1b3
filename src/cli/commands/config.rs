//! Config command - show current configuration

use crate::cli::output::{colors, print_header};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also list stopwords and preserve terms
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    pub cache_file: String,
    #[serde(flatten)]
    pub config: &'a Config,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    xdg: &XdgDirs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = services.config.as_ref();
    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        cache_file: XdgDirs::pages_file(&config.cache.dir)
            .to_string_lossy()
            .into_owned(),
        config,
    };

    match format {
        OutputFormat::Human => print_human(&response, args.all),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}

fn print_human(response: &ConfigResponse<'_>, all: bool) {
    let config = response.config;

    print_header("Configuration:");
    println!("  config_file: {}", response.config_file);
    println!("  cache_file: {}", response.cache_file);

    println!("  {}", colors::label("search:"));
    println!("    default_k: {}", config.search.default_k);
    println!("    max_k: {}", config.search.max_k);
    println!("    max_query_length: {}", config.search.max_query_length);
    println!("    snippet_chars: {}", config.search.snippet_chars);

    println!("  {}", colors::label("scoring:"));
    println!("    k1: {}", config.scoring.k1);
    println!("    b: {}", config.scoring.b);

    println!("  {}", colors::label("vocabulary:"));
    if all {
        println!("    stopwords: {:?}", config.vocabulary.stopwords);
        println!("    preserve_terms: {:?}", config.vocabulary.preserve_terms);
    } else {
        println!("    stopwords: {} terms", config.vocabulary.stopwords.len());
        println!(
            "    preserve_terms: {} terms",
            config.vocabulary.preserve_terms.len()
        );
    }

    println!("  {}", colors::label("sources:"));
    println!("    manifest_urls: {:?}", config.sources.manifest_urls);
    println!("    urls: {:?}", config.sources.urls);
    println!("    local_dirs: {:?}", config.sources.local_dirs);

    println!("  {}", colors::label("fetch:"));
    println!("    allowed_prefixes: {:?}", config.fetch.allowed_prefixes);
    println!("    timeout_sec: {}", config.fetch.timeout_sec);
    println!("    max_concurrent: {}", config.fetch.max_concurrent);

    println!("  {}", colors::label("cache:"));
    println!("    enabled: {}", config.cache.enabled);
    println!("    ttl_hours: {}", config.cache.ttl_hours);
}
