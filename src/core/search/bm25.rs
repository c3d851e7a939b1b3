//! BM25 scoring with field-weighted term frequency.
//!
//! Term frequency is not read from the postings. It is recounted per
//! field from the document text, so a hit in a title or heading weighs
//! more than the same hit in body text:
//!
//! ```text
//! tf  = content + title * title_boost + heading * 4 + code * 2 + link * 2
//! idf = ln((N - df + 0.5) / (df + 0.5) + 1)
//! score = idf * tf * (k1 + 1) / (tf + k1 * (1 - b + b * dl / avgdl))
//! ```

use super::fields::DocumentFields;
use serde::{Deserialize, Serialize};

/// BM25 tuning constants
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Term frequency saturation
    #[serde(default = "default_k1")]
    pub k1: f64,

    /// Document length normalization strength (0 = none, 1 = full)
    #[serde(default = "default_b")]
    pub b: f64,

    #[serde(default)]
    pub title_boost: TitleBoost,

    #[serde(default)]
    pub field_weights: FieldWeights,
}

/// Title multiplier chosen by raw content length
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TitleBoost {
    /// Multiplier for documents with no content at all
    #[serde(default = "default_empty_boost")]
    pub empty: f64,

    /// Multiplier for content shorter than `short_threshold` characters
    #[serde(default = "default_short_boost")]
    pub short: f64,

    #[serde(default = "default_short_threshold")]
    pub short_threshold: usize,

    /// Multiplier for everything else
    #[serde(default = "default_long_boost")]
    pub long: f64,
}

/// Multipliers for structural fields
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldWeights {
    #[serde(default = "default_heading_weight")]
    pub heading: f64,

    /// Fenced blocks and inline code
    #[serde(default = "default_code_weight")]
    pub code: f64,

    #[serde(default = "default_link_weight")]
    pub link: f64,
}

// Default value functions
fn default_k1() -> f64 {
    1.5
}

fn default_b() -> f64 {
    0.75
}

fn default_empty_boost() -> f64 {
    8.0
}

fn default_short_boost() -> f64 {
    5.0
}

fn default_short_threshold() -> usize {
    800
}

fn default_long_boost() -> f64 {
    3.0
}

fn default_heading_weight() -> f64 {
    4.0
}

fn default_code_weight() -> f64 {
    2.0
}

fn default_link_weight() -> f64 {
    2.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            k1: default_k1(),
            b: default_b(),
            title_boost: TitleBoost::default(),
            field_weights: FieldWeights::default(),
        }
    }
}

impl Default for TitleBoost {
    fn default() -> Self {
        Self {
            empty: default_empty_boost(),
            short: default_short_boost(),
            short_threshold: default_short_threshold(),
            long: default_long_boost(),
        }
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            heading: default_heading_weight(),
            code: default_code_weight(),
            link: default_link_weight(),
        }
    }
}

impl TitleBoost {
    /// Multiplier for a document whose raw content has `content_chars` characters
    pub fn for_length(&self, content_chars: usize) -> f64 {
        if content_chars == 0 {
            self.empty
        } else if content_chars < self.short_threshold {
            self.short
        } else {
            self.long
        }
    }
}

/// Stateless BM25 calculator
#[derive(Debug, Clone, Default)]
pub struct Bm25Scorer {
    config: ScoringConfig,
}

impl Bm25Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Field-weighted occurrence count of `token` in a document
    pub fn weighted_tf(&self, fields: &DocumentFields, token: &str) -> f64 {
        let weights = &self.config.field_weights;
        let title_boost = self.config.title_boost.for_length(fields.content_chars);

        let content = count_occurrences(&fields.content, token) as f64;
        let title = count_occurrences(&fields.title, token) as f64;
        let heading = count_occurrences(&fields.headings, token) as f64;
        let code = (count_occurrences(&fields.code_blocks, token)
            + count_occurrences(&fields.inline_code, token)) as f64;
        let link = count_occurrences(&fields.links, token) as f64;

        content
            + title * title_boost
            + heading * weights.heading
            + code * weights.code
            + link * weights.link
    }

    /// Smoothed inverse document frequency, non-negative for `df <= N`
    pub fn idf(&self, document_count: usize, document_frequency: usize) -> f64 {
        let n = document_count.max(1) as f64;
        let df = document_frequency as f64;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln().max(0.0)
    }

    /// Saturated, length-normalized term frequency
    pub fn tf_component(&self, weighted_tf: f64, doc_length: usize, avg_length: f64) -> f64 {
        let k1 = self.config.k1;
        let b = self.config.b;
        let avg_length = avg_length.max(1.0);

        let denominator = weighted_tf + k1 * (1.0 - b + b * (doc_length as f64 / avg_length));
        if denominator <= 0.0 {
            return 0.0;
        }

        weighted_tf * (k1 + 1.0) / denominator
    }

    /// Full BM25 score for one (document, token) pair
    pub fn score(
        &self,
        fields: &DocumentFields,
        token: &str,
        doc_length: usize,
        corpus: CorpusCounts,
    ) -> f64 {
        let tf = self.weighted_tf(fields, token);
        if tf == 0.0 {
            return 0.0;
        }

        let idf = self.idf(corpus.document_count, corpus.document_frequency);
        idf * self.tf_component(tf, doc_length, corpus.average_length)
    }
}

/// Corpus-level inputs to a single score computation
#[derive(Debug, Clone, Copy)]
pub struct CorpusCounts {
    pub document_count: usize,
    pub document_frequency: usize,
    pub average_length: f64,
}

/// Non-overlapping, left-to-right substring count
fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
