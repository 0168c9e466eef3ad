//! Item page URL construction.

use nwitems_core::Error;
use nwitems_core::item::validate_name_key;

/// Build the page URL for a name key.
///
/// The key is appended to `base_url` verbatim, without percent-encoding.
/// Keys that would escape the page path are rejected by
/// [`validate_name_key`] before concatenation.
pub fn item_url(base_url: &str, name_key: &str) -> Result<url::Url, Error> {
    validate_name_key(name_key)?;

    let raw = format!("{base_url}{name_key}");
    url::Url::parse(&raw).map_err(|e| Error::InvalidNameKey(format!("{raw}: {e}")))
}
