//! Search docs tool handler

use super::handler::{text_content, McpToolHandler};
use super::helpers::excerpt;
use crate::core::services::Services;
use crate::core::types::SearchResponse;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub struct SearchDocsHandler {
    services: Arc<Services>,
}

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    k: Option<usize>,
}

impl SearchDocsHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    fn format_results(&self, response: &SearchResponse, terms: &[String]) -> String {
        let mut output = format!(
            "Found {} results for query '{}' ({}ms):\n\n",
            response.count, response.query, response.duration_ms
        );

        if response.hits.is_empty() {
            output.push_str("No results found. Try different keywords.");
            return output;
        }

        let snippet_chars = self.services.config.search.snippet_chars;
        for (i, hit) in response.hits.iter().enumerate() {
            let doc = &hit.document;
            output.push_str(&format!(
                "## {}. {} (score: {:.2})\n",
                i + 1,
                doc.display_title,
                hit.score
            ));
            output.push_str(&format!("**URI:** {}\n\n", doc.uri));

            let snippet = excerpt(&doc.content, terms, snippet_chars);
            if !snippet.is_empty() {
                output.push_str(&format!("> {snippet}\n\n"));
            }
        }

        output.push_str("Use fetch_doc with a URI to read the full page.");
        output
    }
}

#[async_trait]
impl McpToolHandler for SearchDocsHandler {
    fn name(&self) -> &str {
        "search_docs"
    }

    fn schema(&self) -> ToolSchema {
        let search = &self.services.config.search;
        ToolSchema {
            name: "search_docs".to_string(),
            description: "Search the indexed documentation with BM25 ranking. \
                         Page titles, headings and code samples weigh more than body text, \
                         and adjacent-word phrases score above scattered matches. \
                         Returns the top-k pages with title, URI and a short excerpt. \
                         Follow up with fetch_doc to read a page in full."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query. Examples: 'stdio transport', 'tool input schema', 'resource templates'",
                        "minLength": 1,
                        "maxLength": search.max_query_length
                    },
                    "k": {
                        "type": "integer",
                        "description": "Number of results to return",
                        "default": search.default_k,
                        "minimum": 1,
                        "maximum": search.max_k
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, args: Value) -> Result<ToolResult, McpError> {
        let args: SearchArgs =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let response = self
            .services
            .docs
            .search(&args.query, args.k)
            .await
            .map_err(McpError::from)?;

        let terms = self.services.docs.snapshot().await.tokenizer().tokenize(&args.query);
        Ok(text_content(self.format_results(&response, &terms)))
    }
}
