//! MCP protocol unit tests

#[cfg(test)]
mod tests {
    use serde_json::json;
    use docsearch::mcp::protocol::*;

    #[test]
    fn test_parse_initialize_request() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {"tools": {}},
                "clientInfo": {
                    "name": "test",
                    "version": "1.0"
                }
            }
        }"#;

        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "initialize");
        assert_eq!(req.jsonrpc, "2.0");
        assert!(req.id.is_some());
        assert!(req.params.is_some());
    }

    #[test]
    fn test_parse_tools_list_request() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/list"
        }"#;

        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "tools/list");
        assert_eq!(req.jsonrpc, "2.0");
    }

    #[test]
    fn test_serialize_initialize_response() {
        let response = InitializeResult {
            protocol_version: "2024-11-05".to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: "docsearch-mcp".to_string(),
                version: "0.1.0".to_string(),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["protocolVersion"], "2024-11-05");
        assert_eq!(json["serverInfo"]["name"], "docsearch-mcp");
        assert_eq!(json["capabilities"]["tools"]["listChanged"], false);
    }

    #[test]
    fn test_error_response() {
        let error = JsonRpcError {
            code: METHOD_NOT_FOUND,
            message: "Unknown method".to_string(),
            data: None,
        };

        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Unknown method");
    }

    #[test]
    fn test_json_rpc_response_with_result() {
        let response = JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            result: Some(json!({"status": "ok"})),
            error: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"id\":1"));
        assert!(json.contains("\"result\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_json_rpc_response_with_error() {
        let response = JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            result: None,
            error: Some(JsonRpcError {
                code: INTERNAL_ERROR,
                message: "Internal error".to_string(),
                data: None,
            }),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"error\""));
        assert!(json.contains("\"code\":-32603"));
        assert!(!json.contains("\"result\""));
    }

    #[test]
    fn test_tool_schema_uses_camel_case() {
        let schema = ToolSchema {
            name: "fetch_doc".to_string(),
            description: "Fetch".to_string(),
            input_schema: json!({"type": "object"}),
        };

        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["inputSchema"]["type"], "object");
        assert!(json.get("input_schema").is_none());
    }

    #[test]
    fn test_custom_error_codes() {
        assert_eq!(DOCUMENT_NOT_FOUND, -32001);
        assert_eq!(SOURCE_NOT_ALLOWED, -32002);
        assert_eq!(FETCH_FAILED, -32003);
    }
}
