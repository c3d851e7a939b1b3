//! docsearch - BM25 search over documentation pages
//!
//! An in-memory search engine for documentation sites, served to MCP
//! clients over stdio and to humans through a CLI.
//!
//! # Architecture
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - search: tokenizer, field extraction, inverted index, BM25 ranking
//!   - sources: manifest/page fetching, local markdown, allow-list
//!   - cache: live index ownership and on-disk page cache
//!   - config, error, types, xdg, services
//!
//! - **mcp**: MCP adapter (`search_docs`, `fetch_doc`)
//!
//! - **cli**: clap adapter (`search`, `fetch`, `rebuild`, `show-config`)
//!
//! The engine itself is synchronous and total: indexing never fails and
//! queries with nothing to match return no hits.

// Core domain logic (protocol-agnostic)
pub mod core;

// MCP (Model Context Protocol) adapter
pub mod mcp;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{DocsError, Result};
pub use core::search::{SearchIndex, Tokenizer};
pub use core::services::Services;
pub use core::types::*;
