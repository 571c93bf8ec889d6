//! Object key conventions.
//!
//! Every recipe lives in a single flat namespace as `{id}.json`, whether that
//! namespace is a directory on disk or the root of a bucket. There is no index
//! object and no nesting.

use uuid::Uuid;

use crate::error::CoreError;

pub const EXTENSION: &str = ".json";

pub const CONTENT_TYPE: &str = "application/json";

/// Generate a fresh recipe id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Object key for a recipe id. The id must already be validated.
pub fn recipe(id: &str) -> String {
    format!("{id}{EXTENSION}")
}

/// Recover the recipe id from an object key, if the key names a recipe.
pub fn recipe_id(key: &str) -> Option<&str> {
    let id = key.strip_suffix(EXTENSION)?;
    is_valid_id(id).then_some(id)
}

/// Ids are used verbatim as file and object names, so they are restricted to
/// a conservative character set.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

pub fn validate_id(id: &str) -> Result<&str, CoreError> {
    if is_valid_id(id) {
        Ok(id)
    } else {
        Err(CoreError::InvalidId(id.to_string()))
    }
}
