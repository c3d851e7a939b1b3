//! Document acquisition.
//!
//! A [`DocumentSource`] produces the pages the index is built from.
//! Two sources ship with the crate:
//!
//! - **http**: pages listed by llms.txt-style manifests or configured
//!   directly, fetched over the network through the allow-list
//! - **local**: markdown files under configured directories
//!
//! Pages that cannot be acquired are logged and counted, never fatal.

mod allowlist;
pub mod html;
mod http;
mod local;
mod titles;

pub use allowlist::AllowList;
pub use http::{parse_manifest, HttpFetcher, HttpSource, ManifestEntry};
pub use local::{LocalSource, MarkdownWalker};
pub use titles::{curate, CuratedTitle};

use crate::core::error::Result;
use crate::core::types::Document;
use async_trait::async_trait;

/// Pages produced by one source load
#[derive(Debug, Clone, Default)]
pub struct SourceBatch {
    pub documents: Vec<Document>,

    /// Pages that were listed but could not be acquired
    pub skipped: usize,
}

impl SourceBatch {
    pub fn extend(&mut self, other: SourceBatch) {
        self.documents.extend(other.documents);
        self.skipped += other.skipped;
    }
}

/// A provider of documentation pages
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether loaded pages belong in the on-disk page cache
    fn cacheable(&self) -> bool {
        false
    }

    /// Acquire every page this source knows about
    async fn load(&self) -> Result<SourceBatch>;
}
