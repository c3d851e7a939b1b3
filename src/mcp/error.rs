//! MCP-specific error types

use crate::core::error::DocsError;
use crate::mcp::protocol::{
    DOCUMENT_NOT_FOUND, FETCH_FAILED, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST,
    PARSE_ERROR, SOURCE_NOT_ALLOWED,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool error (code {0}): {1}")]
    ToolError(i32, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code and message for this error
    pub fn code_and_message(&self) -> (i32, String) {
        match self {
            McpError::ParseError(msg) => (PARSE_ERROR, msg.clone()),
            McpError::InvalidRequest(msg) => (INVALID_REQUEST, msg.clone()),
            McpError::InvalidParams(msg) => (INVALID_PARAMS, msg.clone()),
            McpError::InternalError(msg) => (INTERNAL_ERROR, msg.clone()),
            McpError::ToolError(code, msg) => (*code, msg.clone()),
            McpError::Io(e) => (INTERNAL_ERROR, format!("I/O error: {e}")),
            McpError::Json(e) => (INTERNAL_ERROR, format!("JSON error: {e}")),
        }
    }
}

impl From<DocsError> for McpError {
    fn from(err: DocsError) -> Self {
        match err {
            DocsError::DocumentNotFound(uri) => {
                McpError::ToolError(DOCUMENT_NOT_FOUND, format!("Document not found: {uri}"))
            }
            DocsError::SourceNotAllowed(uri) => McpError::ToolError(
                SOURCE_NOT_ALLOWED,
                format!("Source not allowed: {uri}"),
            ),
            DocsError::FetchFailed(msg) => {
                McpError::ToolError(FETCH_FAILED, format!("Fetch failed: {msg}"))
            }
            DocsError::HttpError(e) => {
                McpError::ToolError(FETCH_FAILED, format!("Fetch failed: {e}"))
            }
            DocsError::InvalidQuery(s) => McpError::InvalidParams(format!("Invalid query: {s}")),
            DocsError::ConfigError(s) => {
                McpError::InvalidParams(format!("Configuration error: {s}"))
            }
            DocsError::CacheError(s) => McpError::InternalError(format!("Cache error: {s}")),
            DocsError::IoError(e) => McpError::InternalError(format!("I/O error: {e}")),
            DocsError::SerdeError(e) => {
                McpError::InternalError(format!("Serialization error: {e}"))
            }
            DocsError::TomlError(e) => {
                McpError::InternalError(format!("Configuration parse error: {e}"))
            }
        }
    }
}
