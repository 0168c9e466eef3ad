//! Name key validation.
//!
//! Name keys are concatenated into the source URL without escaping, so keys
//! that would change the shape of that URL are rejected up front instead.

use crate::Error;

/// Characters that would leave the page path or alter the request.
const RESERVED: &[char] = &['/', '\\', '?', '#', '%'];

/// Check that a name key can be appended verbatim to the source base URL.
///
/// # Errors
///
/// Returns `Error::InvalidNameKey` if the key is empty, is `.` or `..`, or
/// contains a reserved, whitespace or control character.
pub fn validate_name_key(name_key: &str) -> Result<(), Error> {
    if name_key.is_empty() {
        return Err(Error::InvalidNameKey("name key is empty".into()));
    }

    if name_key == "." || name_key == ".." {
        return Err(Error::InvalidNameKey(format!("{name_key:?} is a relative path segment")));
    }

    if let Some(c) = name_key
        .chars()
        .find(|c| RESERVED.contains(c) || c.is_whitespace() || c.is_control())
    {
        return Err(Error::InvalidNameKey(format!("{name_key:?} contains {c:?}")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        for key in ["Iron_Ore", "Steel_Ingot", "Azoth_(Item)", "Orichalcum-Ingot", "Tier.5", "Ç_Key"] {
            assert!(validate_name_key(key).is_ok(), "{key} should be valid");
        }
    }

    #[test]
    fn test_rejects_empty_and_dot_segments() {
        assert!(matches!(validate_name_key(""), Err(Error::InvalidNameKey(_))));
        assert!(matches!(validate_name_key("."), Err(Error::InvalidNameKey(_))));
        assert!(matches!(validate_name_key(".."), Err(Error::InvalidNameKey(_))));
    }

    #[test]
    fn test_rejects_reserved_characters() {
        for key in ["../etc", "a/b", "a\\b", "a?b=1", "a#b", "a%2Fb", "Iron Ore", "Iron\tOre", "a\u{0}"] {
            assert!(matches!(validate_name_key(key), Err(Error::InvalidNameKey(_))), "{key:?} should be rejected");
        }
    }
}
