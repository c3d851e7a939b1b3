//! Weighted field extraction from markdown-style content.
//!
//! A document is split into title, heading, link-label, code and body
//! fields. The fields are joined into one haystack for presence indexing;
//! the scorer counts term occurrences in each field separately.

use crate::core::types::Document;
use once_cell::sync::Lazy;
use regex::Regex;

// Regex patterns compiled once at startup
static HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#{1,6}[ \t]+(.+)$").unwrap());

static FENCED_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[^\n]*\n(.*?)```").unwrap());

static INLINE_CODE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]\n]+)\]\([^)\n]*\)").unwrap());

/// Lower-cased text fields of a single document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFields {
    pub title: String,
    pub headings: String,
    pub links: String,
    pub code_blocks: String,
    pub inline_code: String,
    pub content: String,

    /// Length of the raw content in characters
    pub content_chars: usize,
}

impl DocumentFields {
    /// Extract all fields from a document
    pub fn extract(document: &Document) -> Self {
        let content = &document.content;
        Self {
            title: document.index_title.to_lowercase(),
            headings: extract_headings(content).to_lowercase(),
            links: extract_link_labels(content).to_lowercase(),
            code_blocks: extract_code_blocks(content).to_lowercase(),
            inline_code: extract_inline_code(content).to_lowercase(),
            content: content.to_lowercase(),
            content_chars: content.chars().count(),
        }
    }

    /// Join the non-empty fields into the indexing haystack.
    ///
    /// Order: title, headings, link labels, fenced code, inline code,
    /// content.
    pub fn haystack(&self) -> String {
        [
            &self.title,
            &self.headings,
            &self.links,
            &self.code_blocks,
            &self.inline_code,
            &self.content,
        ]
        .iter()
        .filter(|field| !field.is_empty())
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Text of every `#`..`######` heading line
pub fn extract_headings(content: &str) -> String {
    collect_captures(&HEADING_PATTERN, content)
}

/// Text between triple-backtick fences, language tag excluded
pub fn extract_code_blocks(content: &str) -> String {
    collect_captures(&FENCED_CODE_PATTERN, content)
}

/// Text between single backticks on one line
pub fn extract_inline_code(content: &str) -> String {
    collect_captures(&INLINE_CODE_PATTERN, content)
}

/// Labels of `[label](target)` links
pub fn extract_link_labels(content: &str) -> String {
    collect_captures(&LINK_PATTERN, content)
}

fn collect_captures(pattern: &Regex, text: &str) -> String {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
