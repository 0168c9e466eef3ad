//! Item rows: lookup and insert.
//!
//! There is no update or delete path. A row is written once,
//! by the first successful fetch for its name key.

use async_trait::async_trait;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, ErrorCode, OptionalExtension};

use super::connection::CacheDb;
use crate::item::{Attributes, AttributesDocument, Item};
use crate::store::ItemStore;
use crate::Error;

/// Raw columns of an `items` row, before the attribute document is decoded.
struct ItemRow {
    name_key: String,
    name: String,
    attributes: Option<AttributesDocument>,
}

impl ItemRow {
    fn into_item(self) -> Result<Item, serde_json::Error> {
        let attributes = match self.attributes {
            Some(doc) => doc.to_mapping()?,
            None => Attributes::new(),
        };
        Ok(Item { name_key: self.name_key, name: self.name, attributes })
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
    )
}

impl CacheDb {
    /// Insert a new item row.
    ///
    /// Empty attribute mappings are stored as NULL.
    ///
    /// # Errors
    ///
    /// Returns `Error::Conflict` if the name key already exists,
    /// `Error::Encoding` if the attributes cannot be serialized, and
    /// `Error::Database` otherwise.
    pub async fn insert_item(&self, item: &Item) -> Result<(), Error> {
        let document = if item.attributes.is_empty() {
            None
        } else {
            Some(AttributesDocument::from_mapping(&item.attributes)?)
        };
        let name_key = item.name_key.clone();
        let name = item.name.clone();
        let created_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                let result = conn.execute(
                    "INSERT INTO items (name_key, name, attributes, created_at) VALUES (?1, ?2, ?3, ?4)",
                    params![&name_key, &name, &document, &created_at],
                );

                match result {
                    Ok(_) => Ok(()),
                    Err(e) if is_unique_violation(&e) => Err(Error::Conflict(name_key)),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Get an item by exact name key.
    ///
    /// Returns None if no row matches. A row whose attribute document does
    /// not decode is reported as None too, so callers refetch instead of
    /// serving a corrupt item.
    pub async fn get_item(&self, name_key: &str) -> Result<Option<Item>, Error> {
        let key = name_key.to_string();
        let row = self
            .conn
            .call(move |conn| -> Result<Option<ItemRow>, Error> {
                let row = conn
                    .query_row(
                        "SELECT name_key, name, attributes FROM items WHERE name_key = ?1",
                        params![key],
                        |row| Ok(ItemRow { name_key: row.get(0)?, name: row.get(1)?, attributes: row.get(2)? }),
                    )
                    .optional()?;
                Ok(row)
            })
            .await
            .map_err(Error::from)?;

        let Some(row) = row else {
            return Ok(None);
        };

        match row.into_item() {
            Ok(item) => Ok(Some(item)),
            Err(e) => {
                tracing::warn!(name_key, error = %e, "stored attributes do not decode; treating as cache miss");
                Ok(None)
            }
        }
    }

    /// Number of cached items.
    pub async fn count_items(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl ItemStore for CacheDb {
    async fn lookup(&self, name_key: &str) -> Result<Option<Item>, Error> {
        self.get_item(name_key).await
    }

    async fn insert(&self, item: &Item) -> Result<(), Error> {
        self.insert_item(item).await
    }
}
