//! MCP (Model Context Protocol) server module
//!
//! JSON-RPC 2.0 over stdio, exposing documentation search as MCP tools.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

// Re-export main types
pub use error::McpError;
pub use server::McpServer;
pub use tools::{McpToolHandler, ToolRegistry};
