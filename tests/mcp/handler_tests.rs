//! MCP handler unit tests

#[cfg(test)]
mod tests {
    use crate::common::{mcp_docs, static_services};
    use docsearch::mcp::handlers::ProtocolHandlers;
    use docsearch::mcp::protocol::*;
    use serde_json::{json, Value};

    fn create_test_handlers() -> ProtocolHandlers {
        ProtocolHandlers::new(static_services(mcp_docs()))
    }

    fn call(id: i64, name: &str, arguments: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(id)),
            method: "tools/call".to_string(),
            params: Some(json!({ "name": name, "arguments": arguments })),
        }
    }

    fn text_of(response: &JsonRpcResponse) -> String {
        let result = response.result.as_ref().expect("tool result");
        result["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_initialize_handler() {
        let handlers = create_test_handlers();

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: "initialize".to_string(),
            params: Some(json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {"tools": {}},
                "clientInfo": {"name": "test", "version": "1.0"}
            })),
        };

        let response = handlers.handle_initialize(request).await.unwrap();

        assert_eq!(response.jsonrpc, "2.0");
        assert!(response.error.is_none());

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "docsearch-mcp");
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_initialize_without_params() {
        let handlers = create_test_handlers();

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: "initialize".to_string(),
            params: None,
        };

        let response = handlers.handle_initialize(request).await.unwrap();
        assert!(response.result.is_some());
    }

    #[tokio::test]
    async fn test_notifications_initialized_sets_flag() {
        let handlers = create_test_handlers();
        assert!(!handlers.is_initialized());

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };

        let response = handlers.handle_initialized(request).await.unwrap();

        assert!(handlers.is_initialized());
        assert!(response.id.is_none());
        assert!(response.result.is_none());
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_tools_list_has_exactly_two_tools() {
        let handlers = create_test_handlers();

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(2)),
            method: "tools/list".to_string(),
            params: None,
        };

        let response = handlers.handle_tools_list(request).await.unwrap();

        let result = response.result.unwrap();
        let names: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["fetch_doc", "search_docs"]);

        for tool in result["tools"].as_array().unwrap() {
            assert_eq!(tool["inputSchema"]["type"], "object");
        }
    }

    #[tokio::test]
    async fn test_tools_call_missing_params() {
        let handlers = create_test_handlers();

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(3)),
            method: "tools/call".to_string(),
            params: None,
        };

        let response = handlers.handle_tools_call(request).await.unwrap();

        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, INVALID_PARAMS);
        assert!(error.message.contains("Missing params"));
    }

    #[tokio::test]
    async fn test_search_docs_call() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_tools_call(call(4, "search_docs", json!({ "query": "stdio", "k": 2 })))
            .await
            .unwrap();

        assert!(response.error.is_none());
        assert_eq!(response.id, Some(json!(4)));
        let text = text_of(&response);
        assert!(text.contains("## 1. stdio Transport"));
        assert!(text.contains("https://modelcontextprotocol.io/docs/concepts/transports"));
    }

    #[tokio::test]
    async fn test_search_docs_invalid_k() {
        let handlers = create_test_handlers();

        for k in [0, 1000] {
            let response = handlers
                .handle_tools_call(call(5, "search_docs", json!({ "query": "tools", "k": k })))
                .await
                .unwrap();
            assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
        }
    }

    #[tokio::test]
    async fn test_fetch_doc_call() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_tools_call(call(
                6,
                "fetch_doc",
                json!({ "uri": "https://modelcontextprotocol.io/docs/concepts/resources" }),
            ))
            .await
            .unwrap();

        let text = text_of(&response);
        assert!(text.starts_with("# Resources"));
        assert!(text.contains("database records"));
    }

    #[tokio::test]
    async fn test_fetch_doc_not_found_code() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_tools_call(call(7, "fetch_doc", json!({ "uri": "not-a-page" })))
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, DOCUMENT_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ping_handler() {
        let handlers = create_test_handlers();

        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(8)),
            method: "ping".to_string(),
            params: None,
        };

        let response = handlers.handle_ping(request).await.unwrap();
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let handlers = create_test_handlers();

        let response = handlers
            .handle_tools_call(call(20, "nonexistent_tool", json!({})))
            .await
            .unwrap();

        let err = response.error.unwrap();
        assert_eq!(err.code, INVALID_REQUEST);
        assert!(
            err.message.contains("nonexistent_tool"),
            "Error should mention tool name, got: {}",
            err.message
        );
    }
}
