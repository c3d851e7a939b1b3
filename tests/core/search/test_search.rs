// Integration tests for search functionality

use crate::common::mcp_docs;
use docsearch::core::search::SearchIndex;
use docsearch::core::types::Document;

fn mcp_index() -> SearchIndex {
    mcp_docs().into_iter().collect()
}

#[test]
fn test_empty_index_returns_nothing() {
    let index = SearchIndex::new();
    assert!(index.search("stdio transport", 5).is_empty());
    assert!(index.search("", 5).is_empty());
}

#[test]
fn test_add_chains_and_counts() {
    let mut index = SearchIndex::new();
    index
        .add(Document::new("a", "A", "alpha"))
        .add(Document::new("b", "B", "beta"))
        .add(Document::new("c", "C", "gamma"));

    assert_eq!(index.size(), 3);
}

#[test]
fn test_stdio_scenario() {
    let index = mcp_index();

    let hits = index.search("stdio", 5);
    assert!(!hits.is_empty());
    assert_eq!(hits[0].document.display_title, "stdio Transport");

    assert!(index.search("xyznonexistent", 5).is_empty());
}

#[test]
fn test_scores_non_increasing() {
    let index = mcp_index();

    for query in ["server", "overview resources tools", "json rpc messages"] {
        let hits = index.search(query, 10);
        for pair in hits.windows(2) {
            assert!(
                pair[0].score >= pair[1].score,
                "query '{}': {} before {}",
                query,
                pair[0].score,
                pair[1].score
            );
        }
    }
}

#[test]
fn test_result_count_capped_by_k() {
    let mut index = SearchIndex::new();
    for i in 0..20 {
        index.add(Document::new(
            format!("https://example.com/{i}"),
            format!("Page {i}"),
            "shared protocol content",
        ));
    }

    assert_eq!(index.search("protocol", 7).len(), 7);
    assert!(index.search("protocol", 0).is_empty());
}

#[test]
fn test_title_only_match_ranks_first() {
    let mut index = SearchIndex::new();
    index
        .add(Document::new(
            "https://example.com/other",
            "Overview",
            "Progress notifications report long-running work.",
        ))
        .add(Document::new(
            "https://example.com/progress",
            "Progress",
            "Notifications report long-running work.",
        ));

    let hits = index.search("progress", 5);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].document.uri, "https://example.com/progress");
}

#[test]
fn test_adjacent_phrase_beats_scattered_terms() {
    let mut index = SearchIndex::new();
    index
        .add(Document::new(
            "https://example.com/scattered",
            "Notes",
            "The tool returns a result. Each call has a schema for input.",
        ))
        .add(Document::new(
            "https://example.com/phrase",
            "Notes",
            "The tool returns a result. Each call has an input schema.",
        ));

    let hits = index.search("input schema", 5);
    assert_eq!(hits[0].document.uri, "https://example.com/phrase");
}

#[test]
fn test_repeated_term_scores_once_per_occurrence() {
    let mut index = SearchIndex::new();
    index
        .add(Document::new(
            "https://example.com/sampling",
            "Notes",
            "Sampling requests. Sampling limits. Sampling results.",
        ))
        .add(Document::new(
            "https://example.com/roots",
            "Notes",
            "Roots describe sampling boundaries.",
        ));

    let token = "sampl";
    let occurrences = index
        .postings(token)
        .iter()
        .filter(|&&position| position == 0)
        .count();
    assert_eq!(occurrences, 3);

    let hits = index.search("sampling", 5);
    assert_eq!(hits[0].document.uri, "https://example.com/sampling");

    let expected = index.score(0, token) * occurrences as f64;
    assert!((hits[0].score - expected).abs() < 1e-9);
}

#[test]
fn test_hits_carry_document_unchanged() {
    let docs = mcp_docs();
    let index: SearchIndex = docs.clone().into_iter().collect();

    let hits = index.search("resources", 1);
    assert_eq!(hits[0].document, docs[2]);
}

#[test]
fn test_corpus_stats() {
    let index = mcp_index();
    let stats = index.stats();

    assert_eq!(stats.documents, 3);
    assert!(stats.vocabulary > 0);
    assert!(stats.average_length > 0.0);
}
