//! URL allow-listing for network fetches.
//!
//! A URL is fetchable when it is http(s), carries no `..` path segment,
//! and sits under one of the configured prefixes (same scheme, host and
//! port, path starting with the prefix path).

use crate::core::error::{DocsError, Result};
use reqwest::Url;

/// Parsed set of allowed URL prefixes
#[derive(Debug, Clone)]
pub struct AllowList {
    prefixes: Vec<Url>,
}

impl AllowList {
    /// Parse configured prefixes. Invalid prefixes are a configuration error.
    pub fn new(prefixes: &[String]) -> Result<Self> {
        let prefixes = prefixes
            .iter()
            .map(|p| {
                let url = Url::parse(p).map_err(|e| {
                    DocsError::ConfigError(format!("Invalid allowed prefix '{p}': {e}"))
                })?;
                if !is_http(&url) {
                    return Err(DocsError::ConfigError(format!(
                        "Allowed prefix '{p}' must be http or https"
                    )));
                }
                Ok(url)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { prefixes })
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Validate `uri` and return it parsed
    pub fn check(&self, uri: &str) -> Result<Url> {
        if has_parent_segment(uri) {
            return Err(DocsError::SourceNotAllowed(format!("{uri} (path traversal)")));
        }

        let url = Url::parse(uri)
            .map_err(|e| DocsError::SourceNotAllowed(format!("{uri} ({e})")))?;

        if !is_http(&url) {
            return Err(DocsError::SourceNotAllowed(format!(
                "{uri} (scheme '{}' not allowed)",
                url.scheme()
            )));
        }

        if self.prefixes.iter().any(|prefix| under_prefix(&url, prefix)) {
            Ok(url)
        } else {
            Err(DocsError::SourceNotAllowed(uri.to_string()))
        }
    }

    pub fn is_allowed(&self, uri: &str) -> bool {
        self.check(uri).is_ok()
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

fn under_prefix(url: &Url, prefix: &Url) -> bool {
    url.scheme() == prefix.scheme()
        && url.host_str() == prefix.host_str()
        && url.port_or_known_default() == prefix.port_or_known_default()
        && url.path().starts_with(prefix.path())
}

/// `..` segments are rejected on the raw string since URL parsing
/// would silently resolve them.
fn has_parent_segment(uri: &str) -> bool {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    let lowered = path.to_ascii_lowercase();
    lowered
        .split(['/', '\\'])
        .any(|segment| matches!(segment, ".." | "%2e%2e" | ".%2e" | "%2e."))
}
