//! Seams between the resolver and its collaborators.
//!
//! The resolver only sees these traits, so the SQLite cache and the HTTP
//! source can be swapped for fakes in tests.

use async_trait::async_trait;

use crate::{Error, Item};

/// Persisted item cache keyed by name key.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Look up an item by exact name key.
    ///
    /// Returns `Ok(None)` when no row matches or the stored attributes cannot
    /// be decoded.
    async fn lookup(&self, name_key: &str) -> Result<Option<Item>, Error>;

    /// Persist a new item.
    ///
    /// # Errors
    ///
    /// Returns `Error::Conflict` if the name key is already stored, and a
    /// storage error for any other failure.
    async fn insert(&self, item: &Item) -> Result<(), Error>;
}

/// External source of item data.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch and parse the item page for a name key.
    ///
    /// # Errors
    ///
    /// Returns one of `InvalidNameKey`, `SourceUnavailable`, `SourceNotFound`
    /// or `ParseError`.
    async fn fetch(&self, name_key: &str) -> Result<Item, Error>;
}
