//! item_get tool implementation.
//!
//! Resolves an item through the cache-aside pipeline: cache first, wiki page
//! on a miss, written back to the cache before returning.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use nwitems_core::{Error, Item, Resolver};

/// Input parameters for item_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ItemGetParams {
    /// Item name key as it appears in the wiki page path, e.g. "Iron_Ore".
    pub name_key: String,
}

/// Render an item as the tool's JSON payload.
pub fn render_item(item: &Item) -> Result<String, Error> {
    serde_json::to_string_pretty(item).map_err(|e| Error::Encoding(format!("failed to serialize item: {e}")))
}

/// Implementation of the item_get tool.
pub async fn get_impl(resolver: &Resolver, params: ItemGetParams) -> Result<CallToolResult, McpError> {
    let item = resolver
        .resolve(&params.name_key)
        .await?
        .ok_or_else(|| Error::ItemNotFound(params.name_key.clone()))?;

    Ok(CallToolResult::success(vec![Content::text(render_item(&item)?)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwitems_client::WikiSource;
    use nwitems_core::{AppConfig, AttributeValue, Attributes, CacheDb};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn resolver_for(server: &MockServer) -> (CacheDb, Resolver) {
        let db = CacheDb::open_in_memory().await.unwrap();
        let config = AppConfig { source_base_url: format!("{}/wiki/", server.uri()), ..Default::default() };
        let source = WikiSource::from_config(&config).unwrap();
        let resolver = Resolver::new(Arc::new(db.clone()), Arc::new(source));
        (db, resolver)
    }

    fn params(name_key: &str) -> ItemGetParams {
        ItemGetParams { name_key: name_key.into() }
    }

    #[test]
    fn test_render_item_shape() {
        let mut attributes = Attributes::new();
        attributes.insert("Tier".into(), AttributeValue::Number(1.0));
        let json = render_item(&Item::new("Iron_Ore", "Iron Ore", attributes)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nameKey"], "Iron_Ore");
        assert_eq!(value["name"], "Iron Ore");
        assert_eq!(value["attributes"]["Tier"], 1.0);
    }

    #[tokio::test]
    async fn test_get_cached_item_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (db, resolver) = resolver_for(&server).await;
        let mut attributes = Attributes::new();
        attributes.insert("Tier".into(), AttributeValue::Number(1.0));
        let iron_ore = Item::new("Iron_Ore", "Iron Ore", attributes);
        db.insert_item(&iron_ore).await.unwrap();

        let result = get_impl(&resolver, params("Iron_Ore")).await.unwrap();
        let text = &result.content[0].as_text().unwrap().text;
        let returned: Item = serde_json::from_str(text).unwrap();
        assert_eq!(returned, iron_ore);
    }

    #[tokio::test]
    async fn test_get_fetches_and_caches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Steel_Ingot"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<h1 id="firstHeading">Steel Ingot</h1>
                   <div class="pi-data"><h3 class="pi-data-label">Refining</h3><div class="pi-data-value">Yes</div></div>"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let (db, resolver) = resolver_for(&server).await;

        assert!(get_impl(&resolver, params("Steel_Ingot")).await.is_ok());
        assert!(get_impl(&resolver, params("Steel_Ingot")).await.is_ok());

        let mut expected = Attributes::new();
        expected.insert("Refining".into(), AttributeValue::Bool(true));
        let stored = db.get_item("Steel_Ingot").await.unwrap().unwrap();
        assert_eq!(stored, Item::new("Steel_Ingot", "Steel Ingot", expected));
    }

    #[tokio::test]
    async fn test_get_missing_page_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (db, resolver) = resolver_for(&server).await;

        let err = get_impl(&resolver, params("Nonexistent_Item")).await.unwrap_err();
        assert_eq!(err.code.0, -32001);
        assert_eq!(db.count_items().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_unreachable_source_is_not_found() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let config = AppConfig { source_base_url: "http://127.0.0.1:1/wiki/".into(), ..Default::default() };
        let source = WikiSource::from_config(&config).unwrap();
        let resolver = Resolver::new(Arc::new(db), Arc::new(source));

        let err = get_impl(&resolver, params("Iron_Ore")).await.unwrap_err();
        assert_eq!(err.code.0, -32001);
    }
}
