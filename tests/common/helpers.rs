// Test helper functions

use async_trait::async_trait;
use docsearch::core::config::Config;
use docsearch::core::error::Result;
use docsearch::core::services::Services;
use docsearch::core::sources::{DocumentSource, SourceBatch};
use docsearch::core::types::Document;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// In-memory document source
#[allow(dead_code)] // Used in integration tests
pub struct StaticSource(pub Vec<Document>);

#[async_trait]
impl DocumentSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn load(&self) -> Result<SourceBatch> {
        Ok(SourceBatch {
            documents: self.0.clone(),
            skipped: 0,
        })
    }
}

/// Defaults with no remote sources and no page cache
#[allow(dead_code)] // Used in integration tests
pub fn offline_config() -> Config {
    let mut config = Config::default();
    config.sources.manifest_urls.clear();
    config.cache.enabled = false;
    config
}

/// Services over a fixed set of documents
#[allow(dead_code)] // Used in integration tests
pub fn static_services(documents: Vec<Document>) -> Arc<Services> {
    let source: Arc<dyn DocumentSource> = Arc::new(StaticSource(documents));
    Arc::new(Services::with_sources(offline_config(), vec![source]))
}

/// Canned HTTP response
#[derive(Clone)]
#[allow(dead_code)] // Used in integration tests
pub struct Route {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

/// Minimal HTTP/1.1 server answering fixed routes, one request per connection
#[allow(dead_code)] // Used in integration tests
pub struct MockHttpServer {
    pub base_url: String,
    requests: Arc<AtomicUsize>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockHttpServer {
    /// Serve `routes` (path → response). Unknown paths get 404.
    ///
    /// A 3xx route answers with its body as the `Location` header.
    #[allow(dead_code)] // Used in integration tests
    pub async fn start(routes: Vec<(&str, u16, &'static str, String)>) -> Self {
        let routes: HashMap<String, Route> = routes
            .into_iter()
            .map(|(path, status, content_type, body)| {
                (
                    path.to_string(),
                    Route {
                        status,
                        content_type,
                        body,
                    },
                )
            })
            .collect();
        let routes = Arc::new(routes);
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let routes = Arc::clone(&routes);
                let counter = Arc::clone(&counter);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }

                    counter.fetch_add(1, Ordering::SeqCst);
                    let request = String::from_utf8_lossy(&buf);
                    let path = request
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("/")
                        .to_string();

                    let route = routes.get(&path).cloned().unwrap_or(Route {
                        status: 404,
                        content_type: "text/plain",
                        body: "not found".to_string(),
                    });

                    let response = if (300..400).contains(&route.status) {
                        format!(
                            "HTTP/1.1 {} X\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            route.status, route.body
                        )
                    } else {
                        format!(
                            "HTTP/1.1 {} X\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            route.status,
                            route.content_type,
                            route.body.len(),
                            route.body
                        )
                    };
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}/"),
            requests,
            handle,
        }
    }

    /// Requests received so far
    #[allow(dead_code)] // Used in integration tests
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Absolute URL for a path on this server
    #[allow(dead_code)] // Used in integration tests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Drop for MockHttpServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
