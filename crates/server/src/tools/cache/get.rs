//! item_cached tool implementation.
//!
//! Reads an item from the cache only. Never touches the wiki.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use nwitems_core::{Error, Resolver};

use crate::tools::item_get::render_item;

/// Parameters for the item_cached tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// The name key of the cached item to retrieve.
    pub name_key: String,
}

/// Implementation of the item_cached tool.
pub async fn get_impl(resolver: &Resolver, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let item = resolver
        .cached(&params.name_key)
        .await
        .ok_or_else(|| Error::CacheMiss(params.name_key.clone()))?;

    Ok(CallToolResult::success(vec![Content::text(render_item(&item)?)]))
}
