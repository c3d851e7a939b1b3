//! XDG Base Directory Support
//!
//! Resolves config, data, state and cache directories for docsearch
//! following the XDG Base Directory specification.

use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "docsearch";

/// XDG directory structure for docsearch
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit DOCSEARCH_*_DIR env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.local/share, etc.)
    pub fn new() -> Self {
        Self {
            config_dir: resolve("DOCSEARCH_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            data_dir: resolve("DOCSEARCH_DATA_DIR", "XDG_DATA_HOME", &[".local", "share"]),
            state_dir: resolve("DOCSEARCH_STATE_DIR", "XDG_STATE_HOME", &[".local", "state"]),
            cache_dir: resolve("DOCSEARCH_CACHE_DIR", "XDG_CACHE_HOME", &[".cache"]),
        }
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        if let Ok(file) = env::var("DOCSEARCH_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Page cache file inside a cache directory
    pub fn pages_file(cache_dir: &std::path::Path) -> PathBuf {
        cache_dir.join("pages.json")
    }

    /// Create config and cache directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.cache_dir)?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::info!("XDG directories resolved:");
        tracing::info!("  Config: {:?}", self.config_dir);
        tracing::info!("  Data: {:?}", self.data_dir);
        tracing::info!("  State: {:?}", self.state_dir);
        tracing::info!("  Cache: {:?}", self.cache_dir);
        tracing::info!("  Config file: {:?}", self.config_file());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

/// Explicit override, then `$XDG_*/docsearch`, then `~/<default>/docsearch`
fn resolve(override_var: &str, xdg_var: &str, default_parts: &[&str]) -> PathBuf {
    if let Ok(dir) = env::var(override_var) {
        return PathBuf::from(dir);
    }

    if let Ok(xdg) = env::var(xdg_var) {
        return PathBuf::from(xdg).join(APP_DIR);
    }

    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    for part in default_parts {
        path.push(part);
    }
    path.join(APP_DIR)
}
