//! Stored form of an attribute mapping.
//!
//! `AttributesDocument` is the only type that holds the raw JSON bytes of
//! the `attributes` column. Everything else goes through `from_mapping` and
//! `to_mapping`.

use tokio_rusqlite::rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use super::Attributes;
use crate::Error;

/// JSON document holding an item's attributes as stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributesDocument {
    bytes: Vec<u8>,
}

impl AttributesDocument {
    /// Encode an attribute mapping.
    ///
    /// # Errors
    ///
    /// Returns `Error::Encoding` if the mapping cannot be serialized.
    pub fn from_mapping(attributes: &Attributes) -> Result<Self, Error> {
        let bytes = serde_json::to_vec(attributes).map_err(|e| Error::Encoding(e.to_string()))?;
        Ok(Self { bytes })
    }

    /// Decode the stored document back into a mapping.
    pub fn to_mapping(&self) -> Result<Attributes, serde_json::Error> {
        serde_json::from_slice(&self.bytes)
    }
}

impl ToSql for AttributesDocument {
    fn to_sql(&self) -> tokio_rusqlite::rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Borrowed(ValueRef::Text(&self.bytes)))
    }
}

impl FromSql for AttributesDocument {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Ok(Self { bytes: bytes.to_vec() }),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}
