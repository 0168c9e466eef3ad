//! nw-items server entry point.
//!
//! Loads configuration, opens the item cache, and serves the item tools
//! over MCP on stdio. Logging goes to stderr to avoid interfering with the
//! JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use nwitems_client::WikiSource;
use nwitems_core::{AppConfig, CacheDb, Resolver};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    let db = CacheDb::open(&config.db_path)
        .await
        .map_err(|e| anyhow!("failed to open item cache {}: {e}", config.db_path.display()))?;
    let source = WikiSource::from_config(&config).map_err(|e| anyhow!("failed to build wiki source: {e}"))?;
    let resolver = Resolver::new(Arc::new(db), Arc::new(source));

    tracing::info!(
        db_path = %config.db_path.display(),
        source = %config.source_base_url,
        "Starting nw-items server on stdio transport"
    );

    let handler = handler::ItemServer::new(resolver);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
