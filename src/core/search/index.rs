//! Append-only in-memory inverted index with BM25 ranking.
//!
//! Each added document gets the next position (0, 1, 2, ...). Its
//! weighted haystack is tokenized, bigrams are derived from the
//! unigrams, and every resulting token gets one posting per occurrence.
//! Document frequency counts distinct documents only.

use super::bigrams::with_bigrams;
use super::bm25::{Bm25Scorer, CorpusCounts, ScoringConfig};
use super::fields::DocumentFields;
use super::ranker::ScoreAccumulator;
use super::tokenizer::Tokenizer;
use super::vocabulary::VocabularyConfig;
use crate::core::types::{CorpusStats, Document, SearchHit};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// In-memory BM25 search index
pub struct SearchIndex {
    tokenizer: Tokenizer,
    scorer: Bm25Scorer,

    documents: Vec<Document>,
    fields: Vec<DocumentFields>,
    doc_lengths: Vec<usize>,
    positions_by_uri: HashMap<String, usize>,

    /// token -> document positions, one entry per occurrence
    postings: HashMap<String, Vec<usize>>,
    /// token -> number of distinct documents containing it
    doc_freq: HashMap<String, usize>,
    /// Tokens already counted for the document being added
    seen: HashSet<String>,

    total_length: usize,
    average_length: f64,
}

impl SearchIndex {
    /// Create an empty index with the default vocabulary and BM25 constants
    pub fn new() -> Self {
        Self::with_parts(Tokenizer::default(), Bm25Scorer::default())
    }

    /// Create an empty index from configuration
    pub fn with_config(vocabulary: &VocabularyConfig, scoring: ScoringConfig) -> Self {
        Self::with_parts(Tokenizer::from_config(vocabulary), Bm25Scorer::new(scoring))
    }

    pub fn with_parts(tokenizer: Tokenizer, scorer: Bm25Scorer) -> Self {
        Self {
            tokenizer,
            scorer,
            documents: Vec::new(),
            fields: Vec::new(),
            doc_lengths: Vec::new(),
            positions_by_uri: HashMap::new(),
            postings: HashMap::new(),
            doc_freq: HashMap::new(),
            seen: HashSet::new(),
            total_length: 0,
            average_length: 0.0,
        }
    }

    /// Index a document. Returns `self` so additions can be chained.
    pub fn add(&mut self, document: Document) -> &mut Self {
        let position = self.documents.len();
        let fields = DocumentFields::extract(&document);
        let tokens = with_bigrams(self.tokenizer.tokenize(&fields.haystack()));

        self.seen.clear();
        for token in &tokens {
            self.postings
                .entry(token.clone())
                .or_default()
                .push(position);

            if self.seen.insert(token.clone()) {
                *self.doc_freq.entry(token.clone()).or_insert(0) += 1;
            }
        }

        tracing::debug!(
            "Indexed '{}' at position {} ({} tokens, {} distinct)",
            document.uri,
            position,
            tokens.len(),
            self.seen.len()
        );

        self.doc_lengths.push(tokens.len());
        self.total_length += tokens.len();
        self.average_length = self.total_length as f64 / self.doc_lengths.len() as f64;

        self.positions_by_uri
            .entry(document.uri.clone())
            .or_insert(position);
        self.fields.push(fields);
        self.documents.push(document);

        self
    }

    /// Number of indexed documents
    pub fn size(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document at an insertion position
    pub fn document(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }

    /// First document added under `uri`
    pub fn get(&self, uri: &str) -> Option<&Document> {
        self.positions_by_uri
            .get(uri)
            .and_then(|&position| self.documents.get(position))
    }

    /// All documents in insertion order
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn scorer(&self) -> &Bm25Scorer {
        &self.scorer
    }

    /// Posting list of `token` (empty when unknown)
    pub fn postings(&self, token: &str) -> &[usize] {
        self.postings.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct documents containing `token`
    pub fn document_frequency(&self, token: &str) -> usize {
        self.doc_freq.get(token).copied().unwrap_or(0)
    }

    /// Token count (unigrams and bigrams) of the document at `position`
    pub fn document_length(&self, position: usize) -> Option<usize> {
        self.doc_lengths.get(position).copied()
    }

    /// Mean document length over every indexed document
    pub fn average_length(&self) -> f64 {
        self.average_length
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            documents: self.documents.len(),
            vocabulary: self.postings.len(),
            average_length: self.average_length,
        }
    }

    /// Unigrams and bigrams of a query
    pub fn query_tokens(&self, query: &str) -> Vec<String> {
        with_bigrams(self.tokenizer.tokenize(query))
    }

    /// BM25 score of `token` for the document at `position`.
    ///
    /// Zero for unknown positions and for tokens absent from every field.
    pub fn score(&self, position: usize, token: &str) -> f64 {
        let (Some(fields), Some(&doc_length)) =
            (self.fields.get(position), self.doc_lengths.get(position))
        else {
            return 0.0;
        };

        let corpus = CorpusCounts {
            document_count: self.documents.len(),
            document_frequency: self.document_frequency(token),
            average_length: self.average_length,
        };
        self.scorer.score(fields, token, doc_length, corpus)
    }

    /// Rank documents against a free-text query.
    ///
    /// Returns at most `k` hits sorted by descending score, ties broken
    /// by insertion order. Empty queries, empty indexes and queries made
    /// only of stopwords or unknown terms yield no hits.
    pub fn search(&self, query: &str, k: usize) -> Vec<SearchHit> {
        if k == 0 || self.is_empty() {
            return Vec::new();
        }

        let mut accumulator = ScoreAccumulator::new();
        for token in self.query_tokens(query) {
            // One contribution per posting entry, so repeats add up
            for &position in self.postings(&token) {
                accumulator.add(position, self.score(position, &token));
            }
        }

        accumulator
            .top_k(k)
            .into_iter()
            .map(|(position, score)| SearchHit {
                score,
                document: self.documents[position].clone(),
            })
            .collect()
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Document> for SearchIndex {
    fn extend<I: IntoIterator<Item = Document>>(&mut self, documents: I) {
        for document in documents {
            self.add(document);
        }
    }
}

impl FromIterator<Document> for SearchIndex {
    fn from_iter<I: IntoIterator<Item = Document>>(documents: I) -> Self {
        let mut index = Self::new();
        index.extend(documents);
        index
    }
}

impl fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchIndex")
            .field("documents", &self.documents.len())
            .field("vocabulary", &self.postings.len())
            .field("average_length", &self.average_length)
            .finish_non_exhaustive()
    }
}
