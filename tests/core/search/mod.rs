//! Search engine tests
//!
//! Ranking behaviour of the in-memory BM25 index.

mod test_search;
mod test_tokenizer;
