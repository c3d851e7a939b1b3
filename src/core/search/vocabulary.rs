//! Stopword and preserve-term vocabulary.
//!
//! Both sets are loadable from configuration so the engine can be
//! retuned for another documentation domain without code changes.
//! The defaults target English technical documentation about the
//! Model Context Protocol.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// English stopwords removed before indexing and querying.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "again", "against", "all", "also", "although", "am",
    "among", "an", "and", "any", "are", "around", "as", "at", "be", "because", "been", "before",
    "being", "below", "between", "both", "but", "by", "can", "cannot", "could", "did", "do",
    "does", "doing", "down", "during", "e", "each", "eg", "either", "etc", "ever", "every", "few",
    "for", "from", "further", "g", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "however", "i", "ie", "if", "in", "into", "is",
    "it", "its", "itself", "just", "let", "lets", "many", "may", "me", "might", "more", "most",
    "much", "must", "my", "myself", "neither", "no", "nor", "not", "now", "of", "off", "on",
    "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shall", "she", "should", "since", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "therefore", "these", "they", "this",
    "those", "though", "through", "thus", "to", "too", "under", "unless", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "when", "where", "whether", "which",
    "while", "who", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself", "yourselves",
];

/// Protocol and format names that must never be stemmed.
pub const DEFAULT_PRESERVE_TERMS: &[&str] = &[
    "mcp", "stdio", "stdin", "stdout", "stderr", "sse", "http", "https", "json", "jsonrpc", "rpc",
    "api", "sdk", "cli", "url", "uri", "oauth", "jwt", "tls", "tcp", "ws", "websocket", "grpc",
    "rest", "yaml", "toml", "html", "css", "xml", "npm", "npx", "uv", "uvx", "pip", "llm", "ai",
    "id", "io", "ui", "os", "ts", "js", "sql", "env", "async",
];

/// Stopword and preserve-term configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VocabularyConfig {
    /// Words dropped before stemming
    #[serde(default = "default_stopwords")]
    pub stopwords: Vec<String>,

    /// Words emitted verbatim, never stemmed
    #[serde(default = "default_preserve_terms")]
    pub preserve_terms: Vec<String>,
}

fn default_stopwords() -> Vec<String> {
    DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect()
}

fn default_preserve_terms() -> Vec<String> {
    DEFAULT_PRESERVE_TERMS.iter().map(|s| s.to_string()).collect()
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            stopwords: default_stopwords(),
            preserve_terms: default_preserve_terms(),
        }
    }
}

/// Lookup sets built from a [`VocabularyConfig`]. Entries are lower-cased.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    stopwords: HashSet<String>,
    preserve_terms: HashSet<String>,
}

impl Vocabulary {
    pub fn new(config: &VocabularyConfig) -> Self {
        Self {
            stopwords: config.stopwords.iter().map(|w| w.to_lowercase()).collect(),
            preserve_terms: config
                .preserve_terms
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn is_preserved(&self, word: &str) -> bool {
        self.preserve_terms.contains(word)
    }

    /// Terms present in both sets. Such terms are always filtered.
    pub fn conflicts(&self) -> Vec<String> {
        let mut conflicts: Vec<String> = self
            .preserve_terms
            .intersection(&self.stopwords)
            .cloned()
            .collect();
        conflicts.sort();
        conflicts
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(&VocabularyConfig::default())
    }
}
