//! Tool handler trait and common types

use crate::mcp::error::McpError;
use crate::mcp::protocol::{ContentBlock, ToolResult, ToolSchema};
use async_trait::async_trait;
use serde_json::Value;

/// An MCP tool: a name, a JSON schema for its arguments, and an async body.
#[async_trait]
pub trait McpToolHandler: Send + Sync {
    /// Tool name as called by clients
    fn name(&self) -> &str;

    /// Tool schema for tools/list
    fn schema(&self) -> ToolSchema;

    /// Run the tool. Domain failures map to JSON-RPC error codes.
    async fn execute(&self, args: Value) -> Result<ToolResult, McpError>;
}

/// Single text block result
pub fn text_content(text: String) -> ToolResult {
    ToolResult {
        content: vec![ContentBlock::Text { text }],
    }
}
