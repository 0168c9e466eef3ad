//! Cache-aside item resolution.
//!
//! ```text
//! lookup ── hit ──────────────────────────────▶ Some(item)
//!    │
//!   miss
//!    ▼
//! fetch ── failure ───────────────────────────▶ None
//!    │
//!  success
//!    ▼
//! insert ── ok ───────────────────────────────▶ Some(item)
//!    ├── conflict ─▶ lookup ── hit ───────────▶ Some(cached)
//!    │                  └──── miss ───────────▶ Err(Conflict)
//!    └── other error ─────────────────────────▶ Err(storage)
//! ```
//!
//! Requests do not coordinate with each other. Two first-time lookups of the
//! same key can both fetch; the store's uniqueness constraint picks the
//! winner and the loser reads the winner's row back.

use std::sync::Arc;

use crate::item::validate_name_key;
use crate::store::{ItemSource, ItemStore};
use crate::{Error, Item};

/// Resolves items from the cache, falling back to the source on a miss.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn ItemStore>,
    source: Arc<dyn ItemSource>,
}

impl Resolver {
    pub fn new(store: Arc<dyn ItemStore>, source: Arc<dyn ItemSource>) -> Self {
        Self { store, source }
    }

    /// Resolve an item by name key.
    ///
    /// Returns `Ok(None)` when the item is neither cached nor retrievable from
    /// the source; the reason is only logged.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the item was fetched but could not be
    /// written to the cache.
    pub async fn resolve(&self, name_key: &str) -> Result<Option<Item>, Error> {
        if let Err(e) = validate_name_key(name_key) {
            tracing::warn!(name_key, error = %e, "rejecting name key");
            return Ok(None);
        }

        if let Some(item) = self.cached(name_key).await {
            tracing::debug!(name_key, "got result (cached)");
            return Ok(Some(item));
        }

        tracing::info!(name_key, "item not cached; fetching from source");
        let item = match self.source.fetch(name_key).await {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(name_key, error = %e, "could not fetch item from source");
                return Ok(None);
            }
        };

        match self.store.insert(&item).await {
            Ok(()) => {
                tracing::debug!(name_key, attributes = item.attributes.len(), "cached item");
                Ok(Some(item))
            }
            Err(Error::Conflict(_)) => {
                tracing::info!(name_key, "item cached by a concurrent request; reading it back");
                match self.cached(name_key).await {
                    Some(existing) => Ok(Some(existing)),
                    None => {
                        tracing::error!(name_key, "conflicting cache row could not be read back");
                        Err(Error::Conflict(name_key.to_string()))
                    }
                }
            }
            Err(e) => {
                tracing::error!(name_key, error = %e, "could not cache item");
                Err(e)
            }
        }
    }

    /// Cache-only lookup. Storage errors are logged and read as a miss.
    pub async fn cached(&self, name_key: &str) -> Option<Item> {
        match self.store.lookup(name_key).await {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(name_key, error = %e, "cache lookup failed; treating as miss");
                None
            }
        }
    }
}
