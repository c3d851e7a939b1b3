//! Network document source.
//!
//! Pages are listed by llms.txt-style manifests (markdown link lists)
//! and by explicitly configured URLs, then fetched concurrently with
//! bounded parallelism. Every URL must pass the allow-list, and so
//! must every redirect hop before it is followed.

use super::allowlist::AllowList;
use super::html::{extract_title, html_to_text, looks_like_html};
use super::titles::curate;
use super::{DocumentSource, SourceBatch};
use crate::core::config::{FetchConfig, SourcesConfig};
use crate::core::error::{DocsError, Result};
use crate::core::types::Document;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::{Attempt, Policy};
use reqwest::Url;
use std::collections::HashSet;
use std::error::Error as _;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

const MAX_REDIRECTS: usize = 10;

static MANIFEST_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\s]+)\)").unwrap());

/// A page listed in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub url: String,
    pub title: Option<String>,
}

/// Extract page links from an llms.txt-style manifest.
///
/// Relative links resolve against `base`; fragments are dropped and
/// duplicates keep their first occurrence.
pub fn parse_manifest(text: &str, base: &Url) -> Vec<ManifestEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for caps in MANIFEST_LINK.captures_iter(text) {
        let Ok(mut url) = base.join(&caps[2]) else {
            continue;
        };
        if !matches!(url.scheme(), "http" | "https") {
            continue;
        }
        url.set_fragment(None);

        let url = url.to_string();
        if seen.insert(url.clone()) {
            let title = caps[1].trim();
            entries.push(ManifestEntry {
                url,
                title: (!title.is_empty()).then(|| title.to_string()),
            });
        }
    }

    entries
}

/// Redirect hop refused by the allow-list
#[derive(Debug)]
struct BlockedRedirect(DocsError);

impl fmt::Display for BlockedRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "redirect blocked: {}", self.0)
    }
}

impl std::error::Error for BlockedRedirect {}

/// Follow a hop only when its target passes the allow-list
fn redirect_policy(allow: AllowList) -> Policy {
    Policy::custom(move |attempt: Attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        match allow.check(attempt.url().as_str()) {
            Ok(_) => attempt.follow(),
            Err(e) => attempt.error(BlockedRedirect(e)),
        }
    })
}

fn send_error(uri: &str, error: reqwest::Error) -> DocsError {
    let blocked = error
        .source()
        .and_then(|source| source.downcast_ref::<BlockedRedirect>());
    match blocked {
        Some(BlockedRedirect(DocsError::SourceNotAllowed(target))) => {
            DocsError::SourceNotAllowed(format!("{uri} redirects to {target}"))
        }
        _ => DocsError::FetchFailed(format!("{uri}: {error}")),
    }
}

/// Allow-listed HTTP client producing documents
pub struct HttpFetcher {
    client: reqwest::Client,
    allow: AllowList,
    max_page_bytes: usize,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let allow = AllowList::new(&config.allowed_prefixes)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .user_agent(config.user_agent.clone())
            .redirect(redirect_policy(allow.clone()))
            .build()?;

        Ok(Self {
            client,
            allow,
            max_page_bytes: config.max_page_bytes,
        })
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow
    }

    /// GET an allow-listed URL. Returns the body and whether it is HTML.
    pub async fn fetch_text(&self, uri: &str) -> Result<(String, bool)> {
        let url = self.allow.check(uri)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| send_error(uri, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocsError::FetchFailed(format!("{uri}: HTTP {status}")));
        }

        if let Some(length) = response.content_length() {
            if length as usize > self.max_page_bytes {
                return Err(DocsError::FetchFailed(format!(
                    "{uri}: page too large ({length} bytes)"
                )));
            }
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(false);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DocsError::FetchFailed(format!("{uri}: {e}")))?;
        if bytes.len() > self.max_page_bytes {
            return Err(DocsError::FetchFailed(format!(
                "{uri}: page too large ({} bytes)",
                bytes.len()
            )));
        }

        let body = String::from_utf8_lossy(&bytes).into_owned();
        let is_html = is_html || looks_like_html(&body);
        Ok((body, is_html))
    }

    /// Fetch one page and turn it into a document
    pub async fn fetch_page(&self, uri: &str, title_hint: Option<&str>) -> Result<Document> {
        let (body, is_html) = self.fetch_text(uri).await?;

        let (content, page_title) = if is_html {
            (html_to_text(&body), extract_title(&body))
        } else {
            (body, None)
        };

        let title = curate(title_hint.or(page_title.as_deref()), uri, &content);
        tracing::debug!("Fetched '{}' ({} chars)", uri, content.len());

        Ok(Document {
            uri: uri.to_string(),
            display_title: title.display,
            index_title: title.index,
            content,
        })
    }
}

/// Manifest and URL list source
pub struct HttpSource {
    fetcher: Arc<HttpFetcher>,
    manifest_urls: Vec<String>,
    urls: Vec<String>,
    max_concurrent: usize,
}

impl HttpSource {
    pub fn new(fetcher: Arc<HttpFetcher>, sources: &SourcesConfig, max_concurrent: usize) -> Self {
        Self {
            fetcher,
            manifest_urls: sources.manifest_urls.clone(),
            urls: sources.urls.clone(),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Every page to fetch, manifests first, deduplicated by URL
    async fn collect_entries(&self) -> (Vec<ManifestEntry>, usize) {
        let mut entries = Vec::new();
        let mut skipped = 0;

        for manifest in &self.manifest_urls {
            let base = match Url::parse(manifest) {
                Ok(base) => base,
                Err(e) => {
                    tracing::warn!("Skipping manifest '{}': {}", manifest, e);
                    skipped += 1;
                    continue;
                }
            };

            match self.fetcher.fetch_text(manifest).await {
                Ok((text, _)) => {
                    let listed = parse_manifest(&text, &base);
                    tracing::info!("Manifest '{}' lists {} pages", manifest, listed.len());
                    entries.extend(listed);
                }
                Err(e) => {
                    tracing::warn!("Skipping manifest '{}': {}", manifest, e);
                    skipped += 1;
                }
            }
        }

        entries.extend(self.urls.iter().map(|url| ManifestEntry {
            url: url.clone(),
            title: None,
        }));

        let mut seen = HashSet::new();
        entries.retain(|entry| seen.insert(entry.url.clone()));

        let before = entries.len();
        entries.retain(|entry| {
            let allowed = self.fetcher.allow_list().is_allowed(&entry.url);
            if !allowed {
                tracing::debug!("Not allow-listed, skipping '{}'", entry.url);
            }
            allowed
        });
        skipped += before - entries.len();

        (entries, skipped)
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn cacheable(&self) -> bool {
        true
    }

    async fn load(&self) -> Result<SourceBatch> {
        let (entries, mut skipped) = self.collect_entries().await;
        tracing::info!(
            "Fetching {} pages ({} at a time)",
            entries.len(),
            self.max_concurrent
        );

        let fetcher = &self.fetcher;
        let results: Vec<(String, Result<Document>)> = stream::iter(entries)
            .map(|entry| async move {
                let result = fetcher.fetch_page(&entry.url, entry.title.as_deref()).await;
                (entry.url, result)
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut documents = Vec::with_capacity(results.len());
        for (url, result) in results {
            match result {
                Ok(document) => documents.push(document),
                Err(e) => {
                    tracing::warn!("Skipping page '{}': {}", url, e);
                    skipped += 1;
                }
            }
        }

        Ok(SourceBatch { documents, skipped })
    }
}
