//! Fetch doc tool handler

use super::handler::{text_content, McpToolHandler};
use crate::core::services::Services;
use crate::core::types::Document;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub struct FetchDocHandler {
    services: Arc<Services>,
}

#[derive(Deserialize)]
struct FetchArgs {
    uri: String,
}

impl FetchDocHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    fn format_document(document: &Document) -> String {
        let mut output = format!("# {}\n\n**URI:** {}\n\n", document.display_title, document.uri);
        if document.content.trim().is_empty() {
            output.push_str("_This page has no text content._");
        } else {
            output.push_str(&document.content);
        }
        output
    }
}

#[async_trait]
impl McpToolHandler for FetchDocHandler {
    fn name(&self) -> &str {
        "fetch_doc"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "fetch_doc".to_string(),
            description: "Return the full text of a documentation page. \
                         Accepts a URI from search_docs results; pages that are not indexed \
                         are fetched on demand when they sit under an allowed source prefix."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "uri": {
                        "type": "string",
                        "description": "Page URI, e.g. 'https://modelcontextprotocol.io/docs/concepts/tools'",
                        "minLength": 1
                    }
                },
                "required": ["uri"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        let args: FetchArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        if args.uri.trim().is_empty() {
            return Err(McpError::InvalidParams("URI cannot be empty".to_string()));
        }

        let document = self
            .services
            .docs
            .fetch_document(&args.uri)
            .await
            .map_err(McpError::from)?;

        Ok(text_content(Self::format_document(&document)))
    }
}
