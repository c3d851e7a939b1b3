//! Error types and error handling for the docsearch service.
//!
//! The ranking engine itself is total and never returns errors. This
//! module covers the layers around it: acquisition, caching and
//! configuration. Protocol-specific error handling (MCP error codes)
//! is handled in the respective adapter modules.

use thiserror::Error;

/// Result type alias for docsearch operations
pub type Result<T> = std::result::Result<T, DocsError>;

/// Main error type for the docsearch service
#[derive(Error, Debug)]
pub enum DocsError {
    #[error("Source not allowed: {0}")]
    SourceNotAllowed(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl DocsError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocsError::DocumentNotFound(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            DocsError::SourceNotAllowed(_) | DocsError::InvalidQuery(_) | DocsError::ConfigError(_)
        )
    }
}
