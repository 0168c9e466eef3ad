//! Core types and shared functionality for nw-items.
//!
//! This crate provides:
//! - The item model and attribute coercion
//! - Cache implementation with SQLite backend
//! - The cache-aside resolver
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod item;
pub mod resolver;
pub mod store;

pub use cache::CacheDb;
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use item::{AttributeValue, Attributes, Item};
pub use resolver::Resolver;
pub use store::{ItemSource, ItemStore};
