//! Unified service container for docsearch
//!
//! Provides shared access to all core services.

use crate::core::cache::{DocsCache, PageStore};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::sources::{DocumentSource, HttpFetcher, HttpSource, LocalSource};
use crate::core::xdg::XdgDirs;
use std::sync::Arc;

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Owner of the live search index
    pub docs: Arc<DocsCache>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Wire sources, fetcher and page cache from configuration
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = if config.fetch.allowed_prefixes.is_empty() {
            None
        } else {
            Some(Arc::new(HttpFetcher::new(&config.fetch)?))
        };

        let mut sources: Vec<Arc<dyn DocumentSource>> = Vec::new();
        if let Some(fetcher) = &fetcher {
            if config.sources.has_remote() {
                sources.push(Arc::new(HttpSource::new(
                    Arc::clone(fetcher),
                    &config.sources,
                    config.fetch.max_concurrent,
                )));
            }
        }
        if !config.sources.local_dirs.is_empty() {
            sources.push(Arc::new(LocalSource::new(
                &config.sources,
                config.fetch.max_page_bytes,
            )?));
        }

        let store = config
            .cache
            .enabled
            .then(|| PageStore::new(XdgDirs::pages_file(&config.cache.dir)));

        let docs = DocsCache::new(&config, sources, fetcher, store);
        Ok(Self {
            docs: Arc::new(docs),
            config: Arc::new(config),
        })
    }

    /// Services over explicit sources, without network fetching or page cache
    pub fn with_sources(config: Config, sources: Vec<Arc<dyn DocumentSource>>) -> Self {
        let docs = DocsCache::new(&config, sources, None, None);
        Self {
            docs: Arc::new(docs),
            config: Arc::new(config),
        }
    }
}
