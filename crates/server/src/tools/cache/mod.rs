//! Cache-related MCP tools.
//!
//! This module provides tools for reading the SQLite item cache directly.

pub mod get;

pub use get::{CacheGetParams, get_impl};
