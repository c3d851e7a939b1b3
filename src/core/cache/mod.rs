//! Owner of the live search index.
//!
//! [`DocsCache`] builds the index from its sources on first use and
//! rebuilds it on demand. A rebuild fills a fresh index off to the side
//! and swaps it in, so queries never observe a half-built corpus and
//! never wait on the network. Pages from cacheable sources are persisted
//! through a [`PageStore`] and reused while fresh.

mod page_store;

pub use page_store::{fingerprint, CachedPages, PageStore};

use crate::core::config::{Config, SearchConfig};
use crate::core::error::{DocsError, Result};
use crate::core::search::{ScoringConfig, SearchIndex, VocabularyConfig};
use crate::core::sources::{DocumentSource, HttpFetcher};
use crate::core::types::{BuildStats, CorpusStats, Document, SearchResponse};
use reqwest::Url;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};

/// Shared, rebuildable search index
pub struct DocsCache {
    index: RwLock<Arc<SearchIndex>>,
    last_build: RwLock<Option<BuildStats>>,
    build_lock: Mutex<()>,

    sources: Vec<Arc<dyn DocumentSource>>,
    fetcher: Option<Arc<HttpFetcher>>,
    store: Option<PageStore>,
    fingerprint: String,
    ttl_hours: u64,

    search: SearchConfig,
    vocabulary: VocabularyConfig,
    scoring: ScoringConfig,
}

impl DocsCache {
    pub fn new(
        config: &Config,
        sources: Vec<Arc<dyn DocumentSource>>,
        fetcher: Option<Arc<HttpFetcher>>,
        store: Option<PageStore>,
    ) -> Self {
        Self {
            index: RwLock::new(Arc::new(SearchIndex::with_config(
                &config.vocabulary,
                config.scoring.clone(),
            ))),
            last_build: RwLock::new(None),
            build_lock: Mutex::new(()),
            sources,
            fetcher,
            store,
            fingerprint: fingerprint(&config.sources),
            ttl_hours: config.cache.ttl_hours,
            search: config.search.clone(),
            vocabulary: config.vocabulary.clone(),
            scoring: config.scoring.clone(),
        }
    }

    /// Build the index once; later calls return immediately
    pub async fn ensure_built(&self) -> Result<()> {
        if self.last_build.read().await.is_some() {
            return Ok(());
        }

        let _guard = self.build_lock.lock().await;
        if self.last_build.read().await.is_some() {
            return Ok(());
        }
        self.build_locked(false).await?;
        Ok(())
    }

    /// Rebuild the index. With `refresh`, cached pages are ignored and
    /// every source is loaded again.
    pub async fn rebuild(&self, refresh: bool) -> Result<BuildStats> {
        let _guard = self.build_lock.lock().await;
        self.build_locked(refresh).await
    }

    async fn build_locked(&self, refresh: bool) -> Result<BuildStats> {
        let start = Instant::now();
        tracing::info!("Building docs index (refresh: {})", refresh);

        let cached = if refresh { None } else { self.fresh_cached_pages() };
        let from_cache = cached.is_some();

        let mut documents = Vec::new();
        let mut remote = Vec::new();
        let mut skipped = 0;

        if let Some(pages) = cached {
            tracing::info!("Using {} cached pages", pages.documents.len());
            documents.extend(pages.documents);
        }

        for source in &self.sources {
            if from_cache && source.cacheable() {
                continue;
            }

            match source.load().await {
                Ok(batch) => {
                    tracing::info!(
                        "Source '{}' produced {} pages ({} skipped)",
                        source.name(),
                        batch.documents.len(),
                        batch.skipped
                    );
                    skipped += batch.skipped;
                    if source.cacheable() {
                        remote.extend(batch.documents.iter().cloned());
                    }
                    documents.extend(batch.documents);
                }
                Err(e) => {
                    tracing::warn!("Source '{}' failed: {}", source.name(), e);
                    skipped += 1;
                }
            }
        }

        if !remote.is_empty() {
            if let Some(store) = &self.store {
                if let Err(e) = store.save(&CachedPages::new(self.fingerprint.clone(), remote)) {
                    tracing::warn!("Failed to write page cache: {}", e);
                }
            }
        }

        let mut index = SearchIndex::with_config(&self.vocabulary, self.scoring.clone());
        index.extend(documents);

        let stats = BuildStats {
            documents_indexed: index.size(),
            pages_skipped: skipped,
            from_cache,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            "Docs index ready: {} documents, {} skipped, {}ms",
            stats.documents_indexed,
            stats.pages_skipped,
            stats.duration_ms
        );

        *self.index.write().await = Arc::new(index);
        *self.last_build.write().await = Some(stats.clone());

        Ok(stats)
    }

    fn fresh_cached_pages(&self) -> Option<CachedPages> {
        let store = self.store.as_ref()?;
        if !self.sources.iter().any(|s| s.cacheable()) {
            return None;
        }

        let pages = match store.load() {
            Ok(pages) => pages?,
            Err(e) => {
                tracing::warn!("Ignoring page cache: {}", e);
                return None;
            }
        };

        if pages.fingerprint != self.fingerprint {
            tracing::info!("Page cache was built from other sources, refetching");
            return None;
        }
        if !pages.is_fresh(self.ttl_hours) {
            tracing::info!("Page cache is stale, refetching");
            return None;
        }
        if pages.documents.is_empty() {
            return None;
        }

        Some(pages)
    }

    /// Current index. Queries score against this snapshot without holding the lock.
    pub async fn snapshot(&self) -> Arc<SearchIndex> {
        Arc::clone(&*self.index.read().await)
    }

    /// Statistics of the most recent build, if any
    pub async fn last_build(&self) -> Option<BuildStats> {
        self.last_build.read().await.clone()
    }

    pub async fn stats(&self) -> CorpusStats {
        self.snapshot().await.stats()
    }

    /// Validate and run a query. `k` defaults to the configured default.
    pub async fn search(&self, query: &str, k: Option<usize>) -> Result<SearchResponse> {
        if query.trim().is_empty() {
            return Err(DocsError::InvalidQuery("Query cannot be empty".to_string()));
        }

        if query.chars().count() > self.search.max_query_length {
            return Err(DocsError::InvalidQuery(format!(
                "Query exceeds {} characters",
                self.search.max_query_length
            )));
        }

        let k = k.unwrap_or(self.search.default_k);
        if k == 0 {
            return Err(DocsError::InvalidQuery("k must be at least 1".to_string()));
        }
        if k > self.search.max_k {
            return Err(DocsError::InvalidQuery(format!(
                "k cannot exceed {}",
                self.search.max_k
            )));
        }

        self.ensure_built().await?;
        let index = self.snapshot().await;

        let start = Instant::now();
        let hits = index.search(query, k);
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::debug!("Query '{}' returned {} hits", query, hits.len());

        Ok(SearchResponse {
            query: query.to_string(),
            count: hits.len(),
            hits,
            duration_ms,
        })
    }

    /// Indexed document by exact URI
    pub async fn get(&self, uri: &str) -> Result<Option<Document>> {
        self.ensure_built().await?;
        Ok(self.snapshot().await.get(uri).cloned())
    }

    /// Full page text: from the index when present, otherwise fetched on
    /// demand when the URI is allow-listed.
    pub async fn fetch_document(&self, uri: &str) -> Result<Document> {
        let uri = uri.trim();
        if let Some(document) = self.get(uri).await? {
            return Ok(document);
        }

        match &self.fetcher {
            Some(fetcher) if Url::parse(uri).is_ok() => fetcher.fetch_page(uri, None).await,
            _ => Err(DocsError::DocumentNotFound(uri.to_string())),
        }
    }
}
