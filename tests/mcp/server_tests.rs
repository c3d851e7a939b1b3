//! Message routing tests

#[cfg(test)]
mod tests {
    use crate::common::{mcp_docs, static_services};
    use docsearch::mcp::handlers::ProtocolHandlers;
    use docsearch::mcp::protocol::*;
    use docsearch::mcp::server::process_message;
    use serde_json::json;

    fn handlers() -> ProtocolHandlers {
        ProtocolHandlers::new(static_services(mcp_docs()))
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let response = process_message(&handlers(), "{not json").await;

        assert!(response.id.is_none());
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let line = r#"{"jsonrpc":"2.0","id":9,"method":"resources/list"}"#;
        let response = process_message(&handlers(), line).await;

        assert_eq!(response.id, Some(json!(9)));
        let error = response.error.unwrap();
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert!(error.message.contains("resources/list"));
    }

    #[tokio::test]
    async fn test_full_session_flow() {
        let handlers = handlers();

        let init = process_message(
            &handlers,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
        )
        .await;
        assert!(init.result.is_some());

        process_message(
            &handlers,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        )
        .await;
        assert!(handlers.is_initialized());

        let search = process_message(
            &handlers,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"search_docs","arguments":{"query":"resources"}}}"#,
        )
        .await;
        let text = search.result.unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(text.contains("Resources"));
    }

    #[tokio::test]
    async fn test_string_ids_round_trip() {
        let line = r#"{"jsonrpc":"2.0","id":"abc","method":"ping"}"#;
        let response = process_message(&handlers(), line).await;

        assert_eq!(response.id, Some(json!("abc")));
    }
}
