//! Local markdown directory source.
//!
//! Traverses directory trees and filters files using glob patterns.
//! Unreadable files and walk errors are logged and skipped.

use super::titles::curate;
use super::{DocumentSource, SourceBatch};
use crate::core::config::SourcesConfig;
use crate::core::error::{DocsError, Result};
use crate::core::types::Document;
use async_trait::async_trait;
use glob::Pattern;
use reqwest::Url;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Pattern-filtered directory walker
pub struct MarkdownWalker {
    include_patterns: Vec<Pattern>,
    exclude_patterns: Vec<Pattern>,
    max_file_bytes: u64,
}

impl MarkdownWalker {
    /// Create a walker. Invalid glob patterns are a configuration error.
    pub fn new(
        include_patterns: &[String],
        exclude_patterns: &[String],
        max_file_bytes: usize,
    ) -> Result<Self> {
        Ok(Self {
            include_patterns: parse_patterns(include_patterns, "include")?,
            exclude_patterns: parse_patterns(exclude_patterns, "exclude")?,
            max_file_bytes: max_file_bytes as u64,
        })
    }

    /// All matching files under `root`, in sorted walk order
    pub fn collect_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_descend(e, root))
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if let Ok(metadata) = entry.metadata() {
                        if metadata.len() > self.max_file_bytes {
                            tracing::debug!(
                                "Skipping large file: {:?} ({} bytes)",
                                path,
                                metadata.len()
                            );
                            continue;
                        }
                    }

                    if self.matches_patterns(path) {
                        files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        files
    }

    /// Hidden and excluded directories are pruned; the root never is
    fn should_descend(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();
        if path == root || !entry.file_type().is_dir() {
            return true;
        }

        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(false);
        if hidden {
            return false;
        }

        !self.exclude_patterns.iter().any(|p| p.matches_path(path))
    }

    fn matches_patterns(&self, path: &Path) -> bool {
        let Some(path_str) = path.to_str() else {
            return false;
        };
        let file_name = path.file_name().and_then(|f| f.to_str()).unwrap_or("");

        let included = self.include_patterns.is_empty()
            || self
                .include_patterns
                .iter()
                .any(|p| p.matches(path_str) || p.matches(file_name));

        included && !self.exclude_patterns.iter().any(|p| p.matches(path_str))
    }
}

fn parse_patterns(patterns: &[String], kind: &str) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p)
                .map_err(|e| DocsError::ConfigError(format!("Invalid {kind} pattern '{p}': {e}")))
        })
        .collect()
}

/// Markdown files under one or more directories
pub struct LocalSource {
    roots: Vec<PathBuf>,
    walker: MarkdownWalker,
}

impl LocalSource {
    pub fn new(sources: &SourcesConfig, max_file_bytes: usize) -> Result<Self> {
        Ok(Self {
            roots: sources.local_dirs.clone(),
            walker: MarkdownWalker::new(
                &sources.include_patterns,
                &sources.exclude_patterns,
                max_file_bytes,
            )?,
        })
    }

    /// Read one file into a document with a `file://` URI
    pub async fn read_document(path: &Path) -> Result<Document> {
        let bytes = tokio::fs::read(path).await?;
        let content = String::from_utf8_lossy(&bytes).into_owned();

        let absolute = match path.canonicalize() {
            Ok(p) => p,
            Err(_) => path.to_path_buf(),
        };
        let uri = Url::from_file_path(&absolute)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| absolute.display().to_string());

        let title = curate(None, &uri, &content);
        Ok(Document {
            uri,
            display_title: title.display,
            index_title: title.index,
            content,
        })
    }
}

#[async_trait]
impl DocumentSource for LocalSource {
    fn name(&self) -> &str {
        "local"
    }

    async fn load(&self) -> Result<SourceBatch> {
        let mut batch = SourceBatch::default();

        for root in &self.roots {
            if !root.is_dir() {
                tracing::warn!("Local docs directory not found: {:?}", root);
                batch.skipped += 1;
                continue;
            }

            let files = self.walker.collect_files(root);
            tracing::info!("Found {} local pages in {:?}", files.len(), root);

            for path in files {
                match Self::read_document(&path).await {
                    Ok(document) => batch.documents.push(document),
                    Err(e) => {
                        tracing::warn!("Skipping {:?}: {}", path, e);
                        batch.skipped += 1;
                    }
                }
            }
        }

        Ok(batch)
    }
}
