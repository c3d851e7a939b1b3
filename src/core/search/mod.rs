//! In-memory BM25 search engine.
//!
//! Leaf-first: vocabulary and tokenizer turn text into terms, the field
//! extractor splits a document into weighted fields, bigrams add short
//! phrases, the index stores postings and corpus statistics, and the
//! scorer and ranker turn a query into ordered hits.

mod bigrams;
mod bm25;
mod fields;
mod index;
mod porter;
mod ranker;
mod tokenizer;
mod vocabulary;

pub use bigrams::{bigrams, with_bigrams, BIGRAM_SEPARATOR};
pub use bm25::{Bm25Scorer, CorpusCounts, FieldWeights, ScoringConfig, TitleBoost};
pub use fields::{
    extract_code_blocks, extract_headings, extract_inline_code, extract_link_labels,
    DocumentFields,
};
pub use index::SearchIndex;
pub use ranker::ScoreAccumulator;
pub use tokenizer::Tokenizer;
pub use vocabulary::{Vocabulary, VocabularyConfig, DEFAULT_PRESERVE_TERMS, DEFAULT_STOPWORDS};
