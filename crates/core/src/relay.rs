//! Relay identifiers: connection cursors and global object IDs.
//!
//! Both are base64 of `"<tag>:<key>"`. Cursors carry the collection tag
//! (`script`, `stylesheet`) and the record key, so they identify a record
//! rather than an index and stay valid while the collection is unchanged.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{DomainError, DomainResult};
use crate::ports::Cursor;

/// Encode a cursor for `key` in the collection tagged `tag`.
pub fn encode_cursor(tag: &str, key: &str) -> Cursor {
    Cursor::new(STANDARD.encode(format!("{tag}:{key}")))
}

/// Decode a cursor of the collection tagged `tag`, returning the record key.
///
/// Fails with [`DomainError::InvalidCursor`] when the token is not base64,
/// not UTF-8, or belongs to another collection.
pub fn decode_cursor(tag: &str, cursor: &Cursor) -> DomainResult<String> {
    let invalid = || DomainError::InvalidCursor {
        collection: tag.to_string(),
        cursor: cursor.value.clone(),
    };

    let (cursor_tag, key) = split_token(&cursor.value).ok_or_else(invalid)?;
    if cursor_tag != tag || key.is_empty() {
        return Err(invalid());
    }
    Ok(key)
}

/// Build a Relay global ID (`toGlobalId`).
pub fn to_global_id(type_name: &str, id: &str) -> String {
    STANDARD.encode(format!("{type_name}:{id}"))
}

/// Split a Relay global ID into `(type, id)` (`fromGlobalId`).
pub fn from_global_id(global_id: &str) -> DomainResult<(String, String)> {
    split_token(global_id)
        .filter(|(type_name, id)| !type_name.is_empty() && !id.is_empty())
        .ok_or_else(|| DomainError::InvalidGlobalId(global_id.to_string()))
}

/// Decode a global ID and check it names an object of `expected_type`.
pub fn expect_global_id(global_id: &str, expected_type: &str) -> DomainResult<String> {
    let (type_name, id) = from_global_id(global_id)?;
    if type_name != expected_type {
        return Err(DomainError::InvalidGlobalId(format!(
            "{global_id} is a {type_name} ID, expected {expected_type}"
        )));
    }
    Ok(id)
}

/// Base64-decode `token` and split it on the first `:`.
fn split_token(token: &str) -> Option<(String, String)> {
    let bytes = STANDARD.decode(token).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    let (head, tail) = text.split_once(':')?;
    Some((head.to_string(), tail.to_string()))
}
