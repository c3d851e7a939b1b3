//! Adjacent-term pairs for short phrase matching.

/// Joins the two halves of a bigram. Tokens never contain whitespace,
/// so a bigram can never collide with a unigram.
pub const BIGRAM_SEPARATOR: &str = " ";

/// Build every adjacent pair of `tokens`, in order.
///
/// A sequence of `n` tokens yields `n - 1` bigrams (none when `n <= 1`).
pub fn bigrams(tokens: &[String]) -> Vec<String> {
    tokens
        .windows(2)
        .map(|pair| format!("{}{BIGRAM_SEPARATOR}{}", pair[0], pair[1]))
        .collect()
}

/// Unigrams followed by their bigrams.
pub fn with_bigrams(mut tokens: Vec<String>) -> Vec<String> {
    let pairs = bigrams(&tokens);
    tokens.extend(pairs);
    tokens
}
