//! Name-ordered set of the tools served over MCP

use super::fetch_doc::FetchDocHandler;
use super::handler::McpToolHandler;
use super::search_docs::SearchDocsHandler;
use crate::core::services::Services;
use crate::mcp::protocol::ToolSchema;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn McpToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `search_docs` and `fetch_doc` over shared services
    pub fn docs_tools(services: &Arc<Services>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SearchDocsHandler::new(Arc::clone(services))));
        registry.register(Arc::new(FetchDocHandler::new(Arc::clone(services))));
        registry
    }

    /// Add a tool. A later tool with the same name replaces the earlier one.
    pub fn register(&mut self, tool: Arc<dyn McpToolHandler>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpToolHandler>> {
        self.tools.get(name)
    }

    /// Schemas for `tools/list`, sorted by tool name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|tool| tool.schema()).collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
