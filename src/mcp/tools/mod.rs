//! MCP tool implementations
//!
//! Tools exposed to MCP clients: ranked documentation search and
//! full-page retrieval.

pub mod fetch_doc;
pub mod handler;
pub mod helpers;
pub mod registry;
pub mod search_docs;

pub use fetch_doc::FetchDocHandler;
pub use handler::{text_content, McpToolHandler};
pub use helpers::excerpt;
pub use registry::ToolRegistry;
pub use search_docs::SearchDocsHandler;
