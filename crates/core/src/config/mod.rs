//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (NW_ITEMS_*)
//! 2. TOML config file (if NW_ITEMS_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (NW_ITEMS_*)
/// 2. TOML config file (if NW_ITEMS_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to SQLite item cache database.
    ///
    /// Set via NW_ITEMS_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Base URL the name key is appended to when fetching an item page.
    ///
    /// Set via NW_ITEMS_SOURCE_BASE_URL environment variable.
    #[serde(default = "default_source_base_url")]
    pub source_base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via NW_ITEMS_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum page size in bytes.
    ///
    /// Set via NW_ITEMS_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via NW_ITEMS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// CSS selector for the page title element.
    #[serde(default = "default_title_selector")]
    pub title_selector: String,

    /// CSS selector for one info panel entry.
    #[serde(default = "default_entry_selector")]
    pub entry_selector: String,

    /// CSS selector for the label inside an info panel entry.
    #[serde(default = "default_label_selector")]
    pub label_selector: String,

    /// CSS selector for the value inside an info panel entry.
    #[serde(default = "default_value_selector")]
    pub value_selector: String,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./nw-items-cache.sqlite")
}

fn default_source_base_url() -> String {
    "https://newworld.fandom.com/wiki/".into()
}

fn default_user_agent() -> String {
    "nw-items/0.1".into()
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_title_selector() -> String {
    "#firstHeading".into()
}

fn default_entry_selector() -> String {
    ".pi-data".into()
}

fn default_label_selector() -> String {
    ".pi-data-label".into()
}

fn default_value_selector() -> String {
    ".pi-data-value".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            source_base_url: default_source_base_url(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            timeout_ms: default_timeout_ms(),
            title_selector: default_title_selector(),
            entry_selector: default_entry_selector(),
            label_selector: default_label_selector(),
            value_selector: default_value_selector(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("NW_ITEMS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("NW_ITEMS_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        Self::from_figment(figment)
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
