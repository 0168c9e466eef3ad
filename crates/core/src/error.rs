//! Unified error types for nw-items.
//!
//! Display strings carry a stable code prefix so that log lines and MCP
//! error messages can be grepped by kind.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the nw-items service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., an unparseable selector).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Name key cannot be used to build a source URL.
    #[error("INVALID_NAME_KEY: {0}")]
    InvalidNameKey(String),

    /// No cache entry found for the given name key.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),

    /// Neither the cache nor the source could produce the item.
    #[error("ITEM_NOT_FOUND: {0}")]
    ItemNotFound(String),

    /// Transport failure talking to the source (DNS, connect, timeout).
    #[error("SOURCE_UNAVAILABLE: {0}")]
    SourceUnavailable(String),

    /// The source answered with a status other than 200.
    #[error("SOURCE_NOT_FOUND: {0}")]
    SourceNotFound(String),

    /// The source body could not be read as a markup document.
    #[error("PARSE_ERROR: {0}")]
    ParseError(String),

    /// Another writer already stored this name key.
    #[error("CONFLICT: {0}")]
    Conflict(String),

    /// Attribute document could not be encoded for storage.
    #[error("STORAGE_ERROR: encoding failed: {0}")]
    Encoding(String),

    /// Database operation failed.
    #[error("STORAGE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORAGE_ERROR: migration failed: {0}")]
    MigrationFailed(String),
}

impl Error {
    /// Whether this error came from the fetch path.
    ///
    /// Callers collapse all of these into a single "not found" outcome.
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            Error::InvalidNameKey(_) | Error::SourceUnavailable(_) | Error::SourceNotFound(_) | Error::ParseError(_)
        )
    }

    /// Whether this is a storage fault operators should see.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::Encoding(_) | Error::MigrationFailed(_) | Error::Conflict(_)
        )
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidNameKey(msg) => (-32602, msg.clone()),
            Error::ItemNotFound(msg) => (-32001, format!("item not found: {msg}")),
            Error::CacheMiss(msg) => (-32001, format!("not cached: {msg}")),
            Error::SourceUnavailable(msg) => (-32003, msg.clone()),
            Error::SourceNotFound(msg) => (-32004, msg.clone()),
            Error::ParseError(msg) => (-32005, msg.clone()),
            Error::Conflict(msg) => (-32002, msg.clone()),
            Error::Encoding(msg) => (-32002, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
