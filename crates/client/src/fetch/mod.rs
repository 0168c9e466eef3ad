//! HTTP fetch of item pages from the reference wiki.
//!
//! ### URL
//! - `base_url` + name key, verbatim (see [`item_url`]).
//!
//! ### Request
//! - One GET per call, no retries.
//! - Redirects follow the HTTP client's default policy.
//!
//! ### Failure kinds
//! - Transport errors (DNS, connect, timeout): `SourceUnavailable`
//! - Any status other than 200: `SourceNotFound`
//! - Oversized body: `ParseError`
//!
//! Invalid UTF-8 in the body is replaced, not rejected.

pub mod url;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

pub use self::url::item_url;

use crate::extract::{PageSelectors, parse_page};
use nwitems_core::{AppConfig, Error, Item, ItemSource};

/// Configuration for the wiki source.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Page base URL; the name key is appended to it.
    pub base_url: String,

    /// User agent string (default: "nw-items/0.1")
    pub user_agent: String,

    /// Maximum response body size in bytes (default: 5MB)
    pub max_bytes: usize,

    /// Request timeout (default: 20s)
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for SourceConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.source_base_url.clone(),
            user_agent: config.user_agent.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
        }
    }
}

/// Item source backed by the reference wiki.
pub struct WikiSource {
    http: Client,
    config: SourceConfig,
    selectors: PageSelectors,
}

impl WikiSource {
    /// Create a new wiki source.
    pub fn new(config: SourceConfig, selectors: PageSelectors) -> Result<Self, Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::InvalidInput(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config, selectors })
    }

    /// Build a source from the application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        Self::new(SourceConfig::from(config), PageSelectors::from_config(config)?)
    }

    /// Fetch the page for a name key and return its HTML.
    pub async fn fetch_page(&self, name_key: &str) -> Result<String, Error> {
        let start = Instant::now();
        let url = item_url(&self.config.base_url, name_key)?;

        let response = self
            .http
            .get(url.as_str())
            .header("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| Error::SourceUnavailable(format!("{url}: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::SourceNotFound(format!("{url}: status {}", status.as_u16())));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(Error::ParseError(format!("{url}: {len} bytes exceeds {}", self.config.max_bytes)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::SourceUnavailable(format!("{url}: failed to read response: {e}")))?;

        if bytes.len() > self.config.max_bytes {
            return Err(Error::ParseError(format!(
                "{url}: {} bytes exceeds {}",
                bytes.len(),
                self.config.max_bytes
            )));
        }

        let html = String::from_utf8_lossy(&bytes).into_owned();

        tracing::debug!(
            name_key,
            %url,
            fetch_ms = start.elapsed().as_millis() as u64,
            bytes = html.len(),
            "fetched item page"
        );

        Ok(html)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}

#[async_trait]
impl ItemSource for WikiSource {
    async fn fetch(&self, name_key: &str) -> Result<Item, Error> {
        let html = self.fetch_page(name_key).await?;
        let item = parse_page(&html, &self.selectors).into_item(name_key);
        tracing::debug!(name_key, name = %item.name, attributes = item.attributes.len(), "parsed item page");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwitems_core::AttributeValue;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const STEEL_INGOT: &str = r#"
        <html><body>
            <h1 id="firstHeading">Steel Ingot</h1>
            <div class="pi-data">
                <h3 class="pi-data-label">Refining</h3>
                <div class="pi-data-value">Yes</div>
            </div>
        </body></html>
    "#;

    fn source_for(server: &MockServer) -> WikiSource {
        let config = SourceConfig { base_url: format!("{}/wiki/", server.uri()), ..Default::default() };
        WikiSource::new(config, PageSelectors::default()).unwrap()
    }

    #[test]
    fn test_source_config_default() {
        let config = SourceConfig::default();
        assert_eq!(config.base_url, "https://newworld.fandom.com/wiki/");
        assert_eq!(config.user_agent, "nw-items/0.1");
        assert_eq!(config.max_bytes, 5 * 1024 * 1024);
        assert_eq!(config.timeout, Duration::from_millis(20000));
    }

    #[tokio::test]
    async fn test_fetch_parses_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Steel_Ingot"))
            .respond_with(ResponseTemplate::new(200).set_body_string(STEEL_INGOT))
            .expect(1)
            .mount(&server)
            .await;

        let item = source_for(&server).fetch("Steel_Ingot").await.unwrap();

        assert_eq!(item.name_key, "Steel_Ingot");
        assert_eq!(item.name, "Steel Ingot");
        assert_eq!(item.attributes.len(), 1);
        assert_eq!(item.attributes["Refining"], AttributeValue::Bool(true));
    }

    #[tokio::test]
    async fn test_fetch_404_is_source_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = source_for(&server).fetch("Missing").await;
        assert!(matches!(result, Err(Error::SourceNotFound(msg)) if msg.contains("404")));
    }

    #[tokio::test]
    async fn test_fetch_non_200_success_is_source_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = source_for(&server).fetch("Iron_Ore").await;
        assert!(matches!(result, Err(Error::SourceNotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_source_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let result = source_for(&server).fetch("Iron_Ore").await;
        assert!(matches!(result, Err(Error::SourceNotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_source_unavailable() {
        let config = SourceConfig { base_url: "http://127.0.0.1:1/wiki/".into(), ..Default::default() };
        let source = WikiSource::new(config, PageSelectors::default()).unwrap();

        let result = source.fetch("Iron_Ore").await;
        assert!(matches!(result, Err(Error::SourceUnavailable(_))));
    }

    #[tokio::test]
    async fn test_fetch_tolerates_invalid_utf8() {
        let mut body = br#"<h1 id="firstHeading">Iron Ore</h1><div class="pi-data"><h3 class="pi-data-label">Tier</h3><div class="pi-data-value">1</div></div><p>"#.to_vec();
        body.extend_from_slice(&[0xff, 0xfe]);
        body.extend_from_slice(b"</p>");

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(&server)
            .await;

        let item = source_for(&server).fetch("Iron_Ore").await.unwrap();
        assert_eq!(item.name, "Iron Ore");
        assert_eq!(item.attributes["Tier"], AttributeValue::Number(1.0));
    }

    #[tokio::test]
    async fn test_fetch_too_large_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(STEEL_INGOT))
            .mount(&server)
            .await;

        let config = SourceConfig { base_url: format!("{}/wiki/", server.uri()), max_bytes: 16, ..Default::default() };
        let source = WikiSource::new(config, PageSelectors::default()).unwrap();

        let result = source.fetch("Steel_Ingot").await;
        assert!(matches!(result, Err(Error::ParseError(msg)) if msg.contains("exceeds")));
    }

    #[tokio::test]
    async fn test_fetch_invalid_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(STEEL_INGOT))
            .expect(0)
            .mount(&server)
            .await;

        let result = source_for(&server).fetch("../secret").await;
        assert!(matches!(result, Err(Error::InvalidNameKey(_))));
    }

    #[tokio::test]
    async fn test_fetch_page_without_infobox() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Azoth_(Item)"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body><p>stub</p></body></html>"))
            .mount(&server)
            .await;

        let item = source_for(&server).fetch("Azoth_(Item)").await.unwrap();
        assert_eq!(item.name, "");
        assert!(item.attributes.is_empty());
    }

    #[tokio::test]
    async fn test_from_config_rejects_bad_selector() {
        let config = AppConfig { entry_selector: "[[".into(), ..Default::default() };
        assert!(matches!(WikiSource::from_config(&config), Err(Error::InvalidInput(_))));
    }
}
