//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field: field.into(), reason: reason.into() }
    }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `source_base_url` is not an absolute http(s) URL
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` or any selector is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = url::Url::parse(&self.source_base_url)
            .map_err(|e| ConfigError::invalid("source_base_url", e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::invalid("source_base_url", format!("unsupported scheme: {}", base.scheme())));
        }
        if !self.source_base_url.ends_with('/') && !self.source_base_url.ends_with('=') {
            tracing::warn!(
                source_base_url = %self.source_base_url,
                "source_base_url does not end with '/'; name keys are appended verbatim"
            );
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::invalid("max_bytes", "must be greater than 0"));
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::invalid("max_bytes", "must not exceed 50MB"));
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::invalid("user_agent", "must not be empty"));
        }

        for (field, selector) in [
            ("title_selector", &self.title_selector),
            ("entry_selector", &self.entry_selector),
            ("label_selector", &self.label_selector),
            ("value_selector", &self.value_selector),
        ] {
            if selector.trim().is_empty() {
                return Err(ConfigError::invalid(field, "must not be empty"));
            }
        }

        Ok(())
    }
}
