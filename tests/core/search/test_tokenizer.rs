// Tokenizer behaviour through the public API

use docsearch::core::search::{Tokenizer, VocabularyConfig};

fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::default().tokenize(text)
}

#[test]
fn test_empty_and_stopword_only_input() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("the and or").is_empty());
}

#[test]
fn test_preserve_terms_are_not_stemmed() {
    for input in ["mcp", "MCP", "Mcp"] {
        assert_eq!(tokenize(input), vec!["mcp".to_string()]);
    }
}

#[test]
fn test_running_stems_to_run() {
    let tokens = tokenize("running");
    assert!(tokens.contains(&"run".to_string()));
    assert!(!tokens.contains(&"running".to_string()));
}

#[test]
fn test_camel_case_parts() {
    let tokens = tokenize("FastMCP");
    assert!(tokens.contains(&"fast".to_string()));
    assert!(tokens.contains(&"mcp".to_string()));
}

#[test]
fn test_hyphenated_words_split() {
    let tokens = tokenize("json-rpc");
    assert!(tokens.contains(&"json".to_string()));
    assert!(tokens.contains(&"rpc".to_string()));
}

#[test]
fn test_custom_vocabulary() {
    let config = VocabularyConfig {
        stopwords: vec!["server".to_string()],
        preserve_terms: vec!["running".to_string()],
    };
    let tokenizer = Tokenizer::from_config(&config);

    assert_eq!(
        tokenizer.tokenize("server running"),
        vec!["running".to_string()]
    );
}

#[test]
fn test_porter_stems_suffix_chains() {
    assert_eq!(tokenize("generalization"), vec!["gener".to_string()]);
    assert_eq!(tokenize("dying"), vec!["dy".to_string()]);
    assert_eq!(tokenize("relational"), vec!["relat".to_string()]);
}
