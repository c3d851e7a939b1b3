//! Helper functions for MCP tools

/// Whitespace-collapsed window of `content` around the first term hit.
///
/// Falls back to the start of the content when no term occurs. The
/// window is at most `max_chars` characters plus ellipsis markers.
pub fn excerpt(content: &str, terms: &[String], max_chars: usize) -> String {
    let text = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }

    let lowered = text.to_lowercase();
    let first_hit = terms
        .iter()
        .filter(|t| !t.is_empty())
        .filter_map(|t| lowered.find(t.as_str()))
        .min()
        .map(|byte_pos| lowered[..byte_pos].chars().count())
        .unwrap_or(0);

    let start = first_hit.saturating_sub(max_chars / 4).min(total - max_chars);
    let end = start + max_chars;

    let window: String = text.chars().skip(start).take(max_chars).collect();
    let mut out = String::with_capacity(window.len() + 6);
    if start > 0 {
        out.push_str("...");
    }
    out.push_str(window.trim());
    if end < total {
        out.push_str("...");
    }
    out
}
