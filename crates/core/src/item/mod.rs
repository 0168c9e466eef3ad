//! Item model shared by the cache, the source client and the server.

pub mod attributes;
pub mod document;
pub mod name_key;

pub use attributes::{AttributeValue, Attributes, coerce};
pub use document::AttributesDocument;
pub use name_key::validate_name_key;

use serde::{Deserialize, Serialize};

/// A resolved game item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique key, used verbatim as the cache key and the source page name.
    pub name_key: String,
    /// Display name from the page heading, empty when the page has none.
    pub name: String,
    /// Coerced info panel attributes.
    #[serde(default)]
    pub attributes: Attributes,
}

impl Item {
    pub fn new(name_key: impl Into<String>, name: impl Into<String>, attributes: Attributes) -> Self {
        Self { name_key: name_key.into(), name: name.into(), attributes }
    }
}
