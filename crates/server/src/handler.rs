//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::{CacheGetParams, ItemGetParams, cache, item_get};

use nwitems_core::Resolver;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for nw-items.
#[derive(Clone)]
pub struct ItemServer {
    resolver: Resolver,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl ItemServer {
    /// Create a new server handler around a resolver.
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver, tool_router: Self::tool_router() }
    }

    /// Resolve an item by name key.
    ///
    /// Serves from the cache when possible, otherwise fetches the wiki page,
    /// caches it and returns it.
    #[tool(description = "Look up a New World item by wiki name key (e.g. \"Iron_Ore\"). \
                          Returns JSON with nameKey, name and typed attributes.")]
    async fn item_get(&self, params: Parameters<ItemGetParams>) -> Result<CallToolResult, McpError> {
        item_get::get_impl(&self.resolver, params.0).await
    }

    /// Read an item from the cache without contacting the wiki.
    #[tool(description = "Read a previously resolved item from the cache only. Fails with a cache miss otherwise.")]
    async fn item_cached(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        cache::get_impl(&self.resolver, params.0).await
    }
}

impl ServerHandler for ItemServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "nw-items".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwitems_client::WikiSource;
    use nwitems_core::{AppConfig, CacheDb};
    use std::sync::Arc;

    async fn server() -> ItemServer {
        let db = CacheDb::open_in_memory().await.unwrap();
        let source = WikiSource::from_config(&AppConfig::default()).unwrap();
        ItemServer::new(Resolver::new(Arc::new(db), Arc::new(source)))
    }

    #[tokio::test]
    async fn test_server_info() {
        let info = server().await.get_info();
        assert_eq!(info.server_info.name, "nw-items");
    }

    #[tokio::test]
    async fn test_registers_item_tools() {
        let server = server().await;
        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();

        assert!(names.contains(&"item_get".to_string()));
        assert!(names.contains(&"item_cached".to_string()));
    }
}
