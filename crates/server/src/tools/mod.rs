//! MCP tool implementations.
//!
//! This module contains all tools exposed by the nw-items server.

pub mod cache;
pub mod item_get;

pub use cache::CacheGetParams;
pub use item_get::ItemGetParams;
