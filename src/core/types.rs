//! Core data types for the docsearch service.
//!
//! This module defines the data structures shared by the engine and
//! its adapters: documents, search hits, requests and responses.

use serde::{Deserialize, Serialize};

/// An indexed documentation page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier, typically the page URL
    pub uri: String,

    /// Title shown to users
    pub display_title: String,

    /// Search-oriented title used for title boosting
    pub index_title: String,

    /// Raw markup content (may be empty)
    #[serde(default)]
    pub content: String,
}

impl Document {
    /// Create a document whose index title equals its display title
    pub fn new(uri: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            uri: uri.into(),
            index_title: title.clone(),
            display_title: title,
            content: content.into(),
        }
    }

    /// Replace the index title
    pub fn with_index_title(mut self, index_title: impl Into<String>) -> Self {
        self.index_title = index_title.into();
        self
    }
}

/// A ranked search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// BM25 relevance score (higher = more relevant, never negative)
    pub score: f64,

    /// The document exactly as it was added
    pub document: Document,
}

/// Corpus-wide statistics of an index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Number of indexed documents
    pub documents: usize,

    /// Number of distinct tokens (unigrams and bigrams)
    pub vocabulary: usize,

    /// Mean document length in tokens
    pub average_length: f64,
}

/// Request to search indexed documentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Search query string
    pub query: String,

    /// Number of results to return (optional)
    pub k: Option<usize>,
}

/// Response from search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Original query string
    pub query: String,

    /// Ranked hits
    pub hits: Vec<SearchHit>,

    /// Number of hits returned
    pub count: usize,

    /// Query duration in milliseconds
    pub duration_ms: u64,
}

/// Statistics from a corpus build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildStats {
    /// Documents added to the index
    pub documents_indexed: usize,

    /// Pages that could not be acquired
    pub pages_skipped: usize,

    /// Whether pages came from the on-disk cache
    pub from_cache: bool,

    /// Build duration in milliseconds
    pub duration_ms: u64,
}
