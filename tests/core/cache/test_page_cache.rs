// Page cache reuse and refresh

use crate::common::{offline_config, MockHttpServer};
use docsearch::core::config::Config;
use docsearch::core::services::Services;
use docsearch::core::xdg::XdgDirs;
use tempfile::TempDir;

async fn manifest_server() -> MockHttpServer {
    MockHttpServer::start(vec![
        (
            "/llms.txt",
            200,
            "text/plain",
            "- [Sampling](/docs/sampling.md)\n- [Roots](/docs/roots.md)\n".to_string(),
        ),
        (
            "/docs/sampling.md",
            200,
            "text/markdown",
            "# Sampling\n\nServers request LLM completions through the client.".to_string(),
        ),
        (
            "/docs/roots.md",
            200,
            "text/markdown",
            "# Roots\n\nRoots define filesystem boundaries.".to_string(),
        ),
    ])
    .await
}

fn cached_config(server: &MockHttpServer, cache_dir: &TempDir) -> Config {
    let mut config = offline_config();
    config.sources.manifest_urls = vec![server.url("/llms.txt")];
    config.fetch.allowed_prefixes = vec![server.base_url.clone()];
    config.fetch.timeout_sec = 5;
    config.cache.enabled = true;
    config.cache.dir = cache_dir.path().to_path_buf();
    config
}

#[tokio::test]
async fn test_second_start_uses_cached_pages() {
    let cache_dir = TempDir::new().unwrap();
    let server = manifest_server().await;
    let config = cached_config(&server, &cache_dir);

    let first = Services::new(config.clone()).unwrap();
    let build = first.docs.rebuild(false).await.unwrap();
    assert_eq!(build.documents_indexed, 2);
    assert!(!build.from_cache);
    assert!(XdgDirs::pages_file(cache_dir.path()).exists());

    // Pages must now come from disk
    drop(server);

    let second = Services::new(config).unwrap();
    let build = second.docs.rebuild(false).await.unwrap();
    assert_eq!(build.documents_indexed, 2);
    assert!(build.from_cache);

    let response = second.docs.search("sampling", None).await.unwrap();
    assert_eq!(response.hits[0].document.display_title, "Sampling");
}

#[tokio::test]
async fn test_refresh_bypasses_cache() {
    let cache_dir = TempDir::new().unwrap();
    let server = manifest_server().await;
    let services = Services::new(cached_config(&server, &cache_dir)).unwrap();

    services.docs.rebuild(false).await.unwrap();
    let build = services.docs.rebuild(true).await.unwrap();

    assert!(!build.from_cache);
    assert_eq!(build.documents_indexed, 2);
}

#[tokio::test]
async fn test_changed_sources_ignore_cache() {
    let cache_dir = TempDir::new().unwrap();
    let server = manifest_server().await;

    let config = cached_config(&server, &cache_dir);
    Services::new(config.clone())
        .unwrap()
        .docs
        .rebuild(false)
        .await
        .unwrap();

    let mut changed = config;
    changed.sources.urls = vec![server.url("/docs/roots.md")];
    let build = Services::new(changed)
        .unwrap()
        .docs
        .rebuild(false)
        .await
        .unwrap();

    assert!(!build.from_cache);
}

#[tokio::test]
async fn test_rebuild_swaps_index_for_existing_snapshots() {
    let cache_dir = TempDir::new().unwrap();
    let server = manifest_server().await;
    let services = Services::new(cached_config(&server, &cache_dir)).unwrap();

    services.docs.ensure_built().await.unwrap();
    let before = services.docs.snapshot().await;

    services.docs.rebuild(true).await.unwrap();
    let after = services.docs.snapshot().await;

    // Old snapshot stays usable; the live index is a new one
    assert_eq!(before.size(), 2);
    assert_eq!(after.size(), 2);
    assert!(!std::sync::Arc::ptr_eq(&before, &after));
}
