//! Tokenizer with stemming, stopword removal and domain-term preservation.
//!
//! Steps for every raw word match:
//! 1. Split on internal hyphens (`json-rpc` -> `json`, `rpc`)
//! 2. Lowercase and drop stopwords
//! 3. Emit preserve-terms verbatim
//! 4. Split camel-case parts (`FastMCP` -> `fast`, `mcp`) and also emit
//!    the stem of the whole part
//! 5. Stem everything else with the Porter stemmer

use super::porter;
use super::vocabulary::{Vocabulary, VocabularyConfig};
use once_cell::sync::Lazy;
use regex::Regex;

// Letters, digits and underscores, allowing internal hyphens
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}_]+(?:-[\p{L}\p{N}_]+)*").unwrap());

/// Text to index-term converter
#[derive(Debug)]
pub struct Tokenizer {
    vocabulary: Vocabulary,
}

impl Tokenizer {
    /// Create a tokenizer over the given vocabulary
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Create a tokenizer from vocabulary configuration
    pub fn from_config(config: &VocabularyConfig) -> Self {
        Self::new(Vocabulary::new(config))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Turn raw text into an ordered sequence of index terms.
    ///
    /// Never fails: text without indexable content yields an empty
    /// sequence.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in WORD_PATTERN.find_iter(text) {
            for part in word.as_str().split('-') {
                self.tokenize_part(part, &mut tokens);
            }
        }
        tokens
    }

    fn tokenize_part(&self, part: &str, tokens: &mut Vec<String>) {
        let lower = part.to_lowercase();
        if lower.is_empty() || self.vocabulary.is_stopword(&lower) {
            return;
        }

        if self.vocabulary.is_preserved(&lower) {
            tokens.push(lower);
            return;
        }

        let pieces = split_camel_case(part);
        if pieces.len() < 2 {
            let stem = self.stem(&lower);
            if !self.vocabulary.is_stopword(&stem) {
                tokens.push(stem);
            }
            return;
        }

        let mut emitted: Vec<String> = Vec::with_capacity(pieces.len() + 1);
        for piece in pieces {
            let sub = piece.to_lowercase();
            if sub.is_empty() || self.vocabulary.is_stopword(&sub) {
                continue;
            }
            if self.vocabulary.is_preserved(&sub) {
                emitted.push(sub);
                continue;
            }
            let stem = self.stem(&sub);
            if !self.vocabulary.is_stopword(&stem) {
                emitted.push(stem);
            }
        }

        // Whole-part stem; dedup is scoped to this part's output only.
        let whole = self.stem(&lower);
        if !self.vocabulary.is_stopword(&whole) && !emitted.contains(&whole) {
            emitted.push(whole);
        }

        tokens.extend(emitted);
    }

    fn stem(&self, word: &str) -> String {
        porter::stem(word)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}


/// Split at every lowercase-to-uppercase transition.
///
/// `getServerInfo` -> `get`, `Server`, `Info`. Uppercase runs stay
/// together: `FastMCP` -> `Fast`, `MCP`.
fn split_camel_case(part: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut prev_lower = false;

    for (i, ch) in part.char_indices() {
        if prev_lower && ch.is_uppercase() {
            pieces.push(&part[start..i]);
            start = i;
        }
        prev_lower = ch.is_lowercase();
    }
    pieces.push(&part[start..]);

    pieces
}
