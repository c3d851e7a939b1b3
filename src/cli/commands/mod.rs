//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for one
//! CLI command. `search` and `fetch` mirror the MCP tools.

pub mod completions;
pub mod config;
pub mod fetch;
pub mod rebuild;
pub mod search;

// Re-export argument types for use in mod.rs
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use fetch::FetchArgs;
pub use rebuild::RebuildArgs;
pub use search::SearchArgs;
