//! Title curation for acquired pages.
//!
//! Produces the two titles a [`Document`](crate::core::types::Document)
//! carries: the display title shown to users, and the index title used
//! for title boosting. The index title drops site-name suffixes and
//! gains the words of the URL slug the display title lacks, so a page
//! titled "Overview" under `/docs/concepts/sampling` is still boosted
//! for "sampling".

use crate::core::search::extract_headings;
use reqwest::Url;

/// Separators that introduce a site-name suffix in page titles
const SUFFIX_SEPARATORS: &[&str] = &[" | ", " - ", " — ", " · "];

/// Display and index titles of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuratedTitle {
    pub display: String,
    pub index: String,
}

/// Pick titles for a page.
///
/// Display title priority: explicit title, first heading of the content,
/// humanized last URL path segment.
pub fn curate(explicit: Option<&str>, uri: &str, content: &str) -> CuratedTitle {
    let display = explicit
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .or_else(|| first_heading(content))
        .unwrap_or_else(|| slug_words(uri).join(" "));

    let mut index = strip_site_suffix(&display).to_string();
    let lowered = index.to_lowercase();
    let missing: Vec<String> = slug_words(uri)
        .into_iter()
        .filter(|word| !lowered.contains(&word.to_lowercase()))
        .collect();
    if !missing.is_empty() {
        if !index.is_empty() {
            index.push(' ');
        }
        index.push_str(&missing.join(" "));
    }

    CuratedTitle { display, index }
}

fn first_heading(content: &str) -> Option<String> {
    extract_headings(content)
        .lines()
        .next()
        .map(str::to_string)
        .filter(|h| !h.is_empty())
}

/// "Tools | Model Context Protocol" -> "Tools"
fn strip_site_suffix(title: &str) -> &str {
    SUFFIX_SEPARATORS
        .iter()
        .filter_map(|sep| title.rfind(sep))
        .max()
        .map(|pos| title[..pos].trim())
        .filter(|head| !head.is_empty())
        .unwrap_or(title)
}

/// Words of the last meaningful path segment: `/docs/build-server.md` ->
/// `["build", "server"]`
fn slug_words(uri: &str) -> Vec<String> {
    let last_segment = match Url::parse(uri) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        Err(_) => uri
            .rsplit(['/', '\\'])
            .find(|s| !s.is_empty())
            .map(str::to_string),
    };

    let Some(segment) = last_segment else {
        return Vec::new();
    };

    let stem = segment
        .rsplit_once('.')
        .map(|(stem, _ext)| stem)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(&segment);

    stem.split(['-', '_', '.', ' '])
        .filter(|w| !w.is_empty() && !w.eq_ignore_ascii_case("index"))
        .map(str::to_string)
        .collect()
}
