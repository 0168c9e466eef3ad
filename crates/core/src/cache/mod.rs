//! SQLite-backed item cache.
//!
//! This module provides the persisted half of the cache-aside lookup, using
//! SQLite with async access via tokio-rusqlite:
//!
//! - One row per name key, enforced by a UNIQUE constraint
//! - Attributes stored as a JSON document column
//! - Automatic schema migrations
//! - WAL mode for concurrent access

pub mod connection;
pub mod items;
pub mod migrations;

pub use crate::Error;

pub use connection::CacheDb;
