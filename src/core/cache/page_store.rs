//! On-disk cache of fetched pages.
//!
//! A single JSON file holds the pages of the last successful network
//! load, the time they were fetched, and a fingerprint of the source
//! configuration that produced them. A changed source list invalidates
//! the cache just like an expired TTL does.

use crate::core::config::SourcesConfig;
use crate::core::error::{DocsError, Result};
use crate::core::types::Document;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound keeping TTL arithmetic in range (about a century)
const MAX_TTL_HOURS: u64 = 24 * 365 * 100;

/// Serialized page cache contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedPages {
    pub fetched_at: DateTime<Utc>,
    pub fingerprint: String,
    pub documents: Vec<Document>,
}

impl CachedPages {
    pub fn new(fingerprint: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            fetched_at: Utc::now(),
            fingerprint: fingerprint.into(),
            documents,
        }
    }

    /// True while younger than `ttl_hours` at `now`
    pub fn is_fresh_at(&self, ttl_hours: u64, now: DateTime<Utc>) -> bool {
        let ttl = Duration::hours(ttl_hours.min(MAX_TTL_HOURS) as i64);
        now.signed_duration_since(self.fetched_at) < ttl
    }

    pub fn is_fresh(&self, ttl_hours: u64) -> bool {
        self.is_fresh_at(ttl_hours, Utc::now())
    }
}

/// Identifies the remote source configuration a cache was built from
pub fn fingerprint(sources: &SourcesConfig) -> String {
    let mut parts: Vec<&str> = sources
        .manifest_urls
        .iter()
        .chain(sources.urls.iter())
        .map(String::as_str)
        .collect();
    parts.sort_unstable();
    parts.join("\n")
}

/// JSON file store for [`CachedPages`]
#[derive(Debug, Clone)]
pub struct PageStore {
    path: PathBuf,
}

impl PageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cache. A missing file is `Ok(None)`; a corrupt one is an error.
    pub fn load(&self) -> Result<Option<CachedPages>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        let pages = serde_json::from_str(&contents).map_err(|e| {
            DocsError::CacheError(format!("Corrupt page cache {:?}: {e}", self.path))
        })?;
        Ok(Some(pages))
    }

    /// Write the cache through a temporary file and rename
    pub fn save(&self, pages: &CachedPages) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec(pages)?)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(
            "Saved {} pages to {:?}",
            pages.documents.len(),
            self.path
        );
        Ok(())
    }

    /// Remove the cache file if present
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
