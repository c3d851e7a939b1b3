// Network source tests against a local mock server

use crate::common::{offline_config, MockHttpServer};
use docsearch::core::config::FetchConfig;
use docsearch::core::error::DocsError;
use docsearch::core::services::Services;
use docsearch::core::sources::{DocumentSource, HttpFetcher, HttpSource};
use std::sync::Arc;

const TOOLS_HTML: &str = "<html><head><title>Tools | Model Context Protocol</title>\
    <script>trackPageView();</script></head><body>\
    <h2>Defining tools</h2><p>Servers expose tools with an <code>inputSchema</code>.</p>\
    <p>Results &amp; errors are returned as content.</p></body></html>";

const TRANSPORTS_MD: &str = "# Transports\n\n## stdio\n\nThe stdio transport talks over stdin and stdout.";

async fn docs_server() -> MockHttpServer {
    let manifest = "# Model Context Protocol\n\n\
        - [Tools](/docs/tools): server-side actions\n\
        - [Transports](/docs/transports.md): message delivery\n\
        - [Missing](/docs/missing)\n\
        - [Elsewhere](https://example.com/other)\n";

    MockHttpServer::start(vec![
        ("/llms.txt", 200, "text/plain", manifest.to_string()),
        ("/docs/tools", 200, "text/html; charset=utf-8", TOOLS_HTML.to_string()),
        ("/docs/transports.md", 200, "text/markdown", TRANSPORTS_MD.to_string()),
        ("/docs/large", 200, "text/plain", "x".repeat(4096)),
    ])
    .await
}

fn fetch_config(server: &MockHttpServer) -> FetchConfig {
    FetchConfig {
        allowed_prefixes: vec![server.base_url.clone()],
        timeout_sec: 5,
        max_page_bytes: 1024,
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn test_manifest_pages_are_fetched_in_order() {
    let server = docs_server().await;
    let fetcher = Arc::new(HttpFetcher::new(&fetch_config(&server)).unwrap());

    let mut sources = offline_config().sources;
    sources.manifest_urls = vec![server.url("/llms.txt")];
    let source = HttpSource::new(fetcher, &sources, 2);

    let batch = source.load().await.unwrap();

    let uris: Vec<&str> = batch.documents.iter().map(|d| d.uri.as_str()).collect();
    assert_eq!(
        uris,
        vec![
            server.url("/docs/tools").as_str(),
            server.url("/docs/transports.md").as_str()
        ]
    );
    // 404 page and the off-prefix link
    assert_eq!(batch.skipped, 2);
}

#[tokio::test]
async fn test_html_page_is_cleaned() {
    let server = docs_server().await;
    let fetcher = HttpFetcher::new(&fetch_config(&server)).unwrap();

    let doc = fetcher
        .fetch_page(&server.url("/docs/tools"), None)
        .await
        .unwrap();

    assert_eq!(doc.index_title, "Tools");
    assert!(doc.content.contains("## Defining tools"));
    assert!(doc.content.contains("`inputSchema`"));
    assert!(doc.content.contains("Results & errors"));
    assert!(!doc.content.contains("trackPageView"));
}

#[tokio::test]
async fn test_manifest_title_hint_wins() {
    let server = docs_server().await;
    let fetcher = HttpFetcher::new(&fetch_config(&server)).unwrap();

    let doc = fetcher
        .fetch_page(&server.url("/docs/transports.md"), Some("Transport layer"))
        .await
        .unwrap();

    assert_eq!(doc.display_title, "Transport layer");
    assert!(doc.content.starts_with("# Transports"));
}

#[tokio::test]
async fn test_off_prefix_url_rejected_before_request() {
    let server = docs_server().await;
    let fetcher = HttpFetcher::new(&fetch_config(&server)).unwrap();

    let err = fetcher
        .fetch_page("https://example.com/other", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DocsError::SourceNotAllowed(_)));
}

#[tokio::test]
async fn test_parent_segments_rejected() {
    let server = docs_server().await;
    let fetcher = HttpFetcher::new(&fetch_config(&server)).unwrap();

    let err = fetcher
        .fetch_text(&server.url("/docs/../admin"))
        .await
        .unwrap_err();
    assert!(matches!(err, DocsError::SourceNotAllowed(_)));
}

#[tokio::test]
async fn test_redirects_checked_before_following() {
    let outside = MockHttpServer::start(vec![(
        "/secret",
        200,
        "text/plain",
        "internal".to_string(),
    )])
    .await;
    let server = MockHttpServer::start(vec![
        ("/docs/old-tools", 302, "text/plain", "/docs/tools".to_string()),
        ("/docs/escape", 302, "text/plain", outside.url("/secret")),
        ("/docs/tools", 200, "text/html", TOOLS_HTML.to_string()),
    ])
    .await;
    let fetcher = HttpFetcher::new(&fetch_config(&server)).unwrap();

    let (body, is_html) = fetcher
        .fetch_text(&server.url("/docs/old-tools"))
        .await
        .unwrap();
    assert!(is_html);
    assert!(body.contains("inputSchema"));

    let err = fetcher
        .fetch_text(&server.url("/docs/escape"))
        .await
        .unwrap_err();
    assert!(matches!(err, DocsError::SourceNotAllowed(_)));
    assert_eq!(outside.request_count(), 0);
}

#[tokio::test]
async fn test_http_errors_and_size_limit() {
    let server = docs_server().await;
    let fetcher = HttpFetcher::new(&fetch_config(&server)).unwrap();

    let missing = fetcher.fetch_text(&server.url("/docs/missing")).await;
    assert!(matches!(missing.unwrap_err(), DocsError::FetchFailed(_)));

    let large = fetcher.fetch_text(&server.url("/docs/large")).await;
    assert!(matches!(large.unwrap_err(), DocsError::FetchFailed(_)));
}

#[tokio::test]
async fn test_services_search_over_fetched_pages() {
    let server = docs_server().await;

    let mut config = offline_config();
    config.sources.manifest_urls = vec![server.url("/llms.txt")];
    config.fetch = fetch_config(&server);
    let services = Services::new(config).unwrap();

    let response = services.docs.search("stdio", None).await.unwrap();
    assert_eq!(response.count, 1);
    assert_eq!(response.hits[0].document.uri, server.url("/docs/transports.md"));

    let build = services.docs.last_build().await.unwrap();
    assert_eq!(build.documents_indexed, 2);
    assert!(!build.from_cache);
}
