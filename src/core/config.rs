//! Configuration management for the docsearch service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{DocsError, Result};
use crate::core::search::{ScoringConfig, VocabularyConfig};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default number of results to return
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Maximum results per query
    #[serde(default = "default_max_k")]
    pub max_k: usize,

    /// Maximum query string length
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,

    /// Excerpt length shown with each hit, in characters
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

/// Where documentation pages come from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    /// llms.txt-style manifests listing page links
    #[serde(default = "default_manifest_urls")]
    pub manifest_urls: Vec<String>,

    /// Individual pages fetched in addition to manifest links
    #[serde(default)]
    pub urls: Vec<String>,

    /// Local directories of markdown files
    #[serde(default)]
    pub local_dirs: Vec<PathBuf>,

    /// File patterns to include from local directories (glob syntax)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// File patterns to exclude from local directories (glob syntax)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

/// Network fetch limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    /// URL prefixes that may be fetched
    #[serde(default = "default_allowed_prefixes")]
    pub allowed_prefixes: Vec<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    /// Pages larger than this are skipped
    #[serde(default = "default_max_page_bytes")]
    pub max_page_bytes: usize,

    /// Maximum pages fetched at once
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// On-disk page cache
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Read and write the page cache
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Pages older than this are fetched again
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,

    /// Directory holding the page cache file
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

// Default value functions
fn default_k() -> usize {
    5
}

fn default_max_k() -> usize {
    50
}

fn default_max_query_length() -> usize {
    500
}

fn default_snippet_chars() -> usize {
    300
}

fn default_manifest_urls() -> Vec<String> {
    vec!["https://modelcontextprotocol.io/llms.txt".to_string()]
}

fn default_include_patterns() -> Vec<String> {
    vec!["*.md".to_string(), "*.mdx".to_string(), "*.txt".to_string()]
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
    ]
}

fn default_allowed_prefixes() -> Vec<String> {
    vec!["https://modelcontextprotocol.io/".to_string()]
}

fn default_timeout_sec() -> u64 {
    30
}

fn default_max_page_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_max_concurrent() -> usize {
    8
}

fn default_user_agent() -> String {
    format!("docsearch/{}", env!("CARGO_PKG_VERSION"))
}

fn default_cache_enabled() -> bool {
    true
}

fn default_ttl_hours() -> u64 {
    24
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("./cache")
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            max_k: default_max_k(),
            max_query_length: default_max_query_length(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            manifest_urls: default_manifest_urls(),
            urls: Vec::new(),
            local_dirs: Vec::new(),
            include_patterns: default_include_patterns(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            allowed_prefixes: default_allowed_prefixes(),
            timeout_sec: default_timeout_sec(),
            max_page_bytes: default_max_page_bytes(),
            max_concurrent: default_max_concurrent(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_hours: default_ttl_hours(),
            dir: default_cache_dir(),
        }
    }
}

impl SourcesConfig {
    /// True when at least one page must come from the network
    pub fn has_remote(&self) -> bool {
        !self.manifest_urls.is_empty() || !self.urls.is_empty()
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| DocsError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. DOCSEARCH_CONFIG env var
    /// 2. XDG config file (~/.config/docsearch/config.toml)
    /// 3. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("DOCSEARCH_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else {
                Self::default()
            }
        };

        // Cache lives under the XDG cache directory unless set explicitly
        if config.cache.dir == default_cache_dir() {
            config.cache.dir = xdg.cache_dir.clone();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Search configuration
        if let Ok(default_k) = env::var("DOCSEARCH_DEFAULT_K") {
            if let Ok(k) = default_k.parse() {
                self.search.default_k = k;
            }
        }
        if let Ok(max_k) = env::var("DOCSEARCH_MAX_K") {
            if let Ok(k) = max_k.parse() {
                self.search.max_k = k;
            }
        }
        if let Ok(max_query_len) = env::var("DOCSEARCH_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_query_len.parse() {
                self.search.max_query_length = len;
            }
        }

        // Fetch configuration
        if let Ok(timeout) = env::var("DOCSEARCH_FETCH_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.fetch.timeout_sec = t;
            }
        }
        if let Ok(max_concurrent) = env::var("DOCSEARCH_MAX_CONCURRENT_FETCHES") {
            if let Ok(max) = max_concurrent.parse() {
                self.fetch.max_concurrent = max;
            }
        }

        // Cache configuration
        if let Ok(ttl) = env::var("DOCSEARCH_CACHE_TTL_HOURS") {
            if let Ok(hours) = ttl.parse() {
                self.cache.ttl_hours = hours;
            }
        }
        if let Ok(dir) = env::var("DOCSEARCH_CACHE_DIR") {
            self.cache.dir = PathBuf::from(dir);
        }

        // Sources configuration
        if let Ok(local_docs) = env::var("DOCSEARCH_LOCAL_DOCS") {
            self.sources.local_dirs = env::split_paths(&local_docs)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate search config
        if self.search.default_k == 0 {
            return Err(DocsError::ConfigError(
                "Default k must be non-zero".to_string(),
            ));
        }

        if self.search.default_k > self.search.max_k {
            return Err(DocsError::ConfigError(
                "Default k cannot exceed max k".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(DocsError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        // Validate scoring config
        if !(self.scoring.k1.is_finite() && self.scoring.k1 > 0.0) {
            return Err(DocsError::ConfigError(
                "k1 must be a positive number".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.scoring.b) {
            return Err(DocsError::ConfigError(
                "b must be between 0 and 1".to_string(),
            ));
        }

        let boost = &self.scoring.title_boost;
        let weights = &self.scoring.field_weights;
        let multipliers = [
            boost.empty,
            boost.short,
            boost.long,
            weights.heading,
            weights.code,
            weights.link,
        ];
        if multipliers.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(DocsError::ConfigError(
                "Title boosts and field weights must be non-negative".to_string(),
            ));
        }

        // Validate fetch config
        if self.sources.has_remote() && self.fetch.allowed_prefixes.is_empty() {
            return Err(DocsError::ConfigError(
                "Allowed prefixes must be set when remote sources are configured".to_string(),
            ));
        }

        if self.fetch.timeout_sec == 0 {
            return Err(DocsError::ConfigError(
                "Fetch timeout must be non-zero".to_string(),
            ));
        }

        if self.fetch.max_concurrent == 0 {
            return Err(DocsError::ConfigError(
                "Max concurrent fetches must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Default k: {}", self.search.default_k);
        tracing::info!("  Max k: {}", self.search.max_k);
        tracing::info!("  Max query length: {}", self.search.max_query_length);
        tracing::info!("  BM25 k1: {}, b: {}", self.scoring.k1, self.scoring.b);
        tracing::info!(
            "  Vocabulary: {} stopwords, {} preserve terms",
            self.vocabulary.stopwords.len(),
            self.vocabulary.preserve_terms.len()
        );
        tracing::info!("  Manifests: {:?}", self.sources.manifest_urls);
        tracing::info!("  Extra URLs: {}", self.sources.urls.len());
        tracing::info!("  Local dirs: {:?}", self.sources.local_dirs);
        tracing::info!("  Allowed prefixes: {:?}", self.fetch.allowed_prefixes);
        tracing::info!("  Fetch timeout: {}s", self.fetch.timeout_sec);
        tracing::info!("  Max concurrent fetches: {}", self.fetch.max_concurrent);
        tracing::info!(
            "  Page cache: {} ({}h TTL, {:?})",
            if self.cache.enabled { "on" } else { "off" },
            self.cache.ttl_hours,
            self.cache.dir
        );
    }
}
