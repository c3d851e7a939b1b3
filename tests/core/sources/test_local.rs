// Local markdown directory tests

use crate::common::{offline_config, DocsDir};
use docsearch::core::error::DocsError;
use docsearch::core::services::Services;

fn local_services(dir: &DocsDir) -> Services {
    let mut config = offline_config();
    config.sources.local_dirs = vec![dir.path().to_path_buf()];
    Services::new(config).unwrap()
}

#[tokio::test]
async fn test_local_pages_are_indexed() {
    let dir = DocsDir::guides();
    let services = local_services(&dir);

    let build = services.docs.rebuild(false).await.unwrap();

    // quickstart.md, guides/debugging.md, guides/notes.txt
    assert_eq!(build.documents_indexed, 3);
    assert_eq!(build.pages_skipped, 0);
}

#[tokio::test]
async fn test_hidden_directories_are_skipped() {
    let dir = DocsDir::guides();
    let services = local_services(&dir);

    let response = services.docs.search("published", None).await.unwrap();
    assert!(response.hits.is_empty());
}

#[tokio::test]
async fn test_local_titles_from_headings() {
    let dir = DocsDir::guides();
    let services = local_services(&dir);

    let response = services.docs.search("inspector", None).await.unwrap();
    assert_eq!(response.hits[0].document.display_title, "Debugging");
    assert!(response.hits[0].document.uri.starts_with("file://"));
}

#[tokio::test]
async fn test_fetch_local_document_by_uri() {
    let dir = DocsDir::guides();
    let services = local_services(&dir);

    let response = services.docs.search("quickstart", Some(1)).await.unwrap();
    let uri = response.hits[0].document.uri.clone();

    let document = services.docs.fetch_document(&uri).await.unwrap();
    assert!(document.content.contains("first server"));
}

#[tokio::test]
async fn test_missing_directory_counts_as_skipped() {
    let mut config = offline_config();
    config.sources.local_dirs = vec!["/nonexistent/docsearch/docs".into()];
    let services = Services::new(config).unwrap();

    let build = services.docs.rebuild(false).await.unwrap();
    assert_eq!(build.documents_indexed, 0);
    assert_eq!(build.pages_skipped, 1);

    let err = services
        .docs
        .fetch_document("/nonexistent/docsearch/docs/a.md")
        .await
        .unwrap_err();
    assert!(matches!(err, DocsError::DocumentNotFound(_)));
}
