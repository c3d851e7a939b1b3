//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of transport protocols (MCP, CLI).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **search**: In-memory BM25 engine
//! - **sources**: Page acquisition (network, local markdown)
//! - **cache**: Page cache and the shared, rebuildable index
//! - **services**: Unified service container

pub mod cache;
pub mod config;
pub mod error;
pub mod search;
pub mod services;
pub mod sources;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{DocsError, Result};
pub use services::Services;
