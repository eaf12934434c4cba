//! Document store abstraction.
//!
//! Data lives in a schemaless document database: named collections of JSON
//! objects, each addressed by a string key. Collection paths may be nested
//! under a parent document, e.g. `carts/{user_id}/items`.
//!
//! Repositories in [`crate::db`] are the only callers; route handlers never
//! touch documents directly.

mod memory;

use std::future::Future;

use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::MemoryStore;

/// A stored document's fields.
pub type Fields = Map<String, Value>;

/// A document together with its key.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub key: String,
    pub fields: Fields,
}

impl Document {
    /// Fields with the key injected as `"id"`.
    ///
    /// An `id` field stored inside the document takes precedence.
    #[must_use]
    pub fn with_id(self) -> Fields {
        let mut fields = self.fields;
        fields
            .entry("id")
            .or_insert_with(|| Value::String(self.key));
        fields
    }
}

/// Errors from the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document to update does not exist.
    #[error("document {collection}/{key} not found")]
    NotFound { collection: String, key: String },

    /// Collection path is empty or malformed.
    #[error("invalid collection path: {0:?}")]
    InvalidPath(String),

    /// Seed data could not be read.
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// Seed data is not `{collection: {key: document}}`.
    #[error("invalid seed data: {0}")]
    Seed(String),
}

/// Collection/key document access.
///
/// `update` merges the given fields into an existing document; `insert`
/// writes a whole document, replacing any previous one with that key.
pub trait DocumentStore: Send + Sync {
    /// Every document in a collection, ordered by key.
    fn list(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<Vec<Document>, StoreError>> + Send;

    /// One document, if present.
    fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Merge `fields` into an existing document.
    fn update(
        &self,
        collection: &str,
        key: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete a document. Deleting a missing document succeeds.
    fn delete(
        &self,
        collection: &str,
        key: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Write a whole document.
    fn insert(
        &self,
        collection: &str,
        key: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Check a collection path: non-empty segments, odd segment count
/// (`collection` or `collection/doc/subcollection`).
///
/// # Errors
///
/// Returns `StoreError::InvalidPath` for malformed paths.
pub fn validate_collection(path: &str) -> Result<(), StoreError> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.trim().is_empty()) || segments.len() % 2 == 0 {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_validate_collection() {
        assert!(validate_collection("products").is_ok());
        assert!(validate_collection("carts/u1/items").is_ok());
        assert!(validate_collection("").is_err());
        assert!(validate_collection("carts/u1").is_err());
        assert!(validate_collection("carts//items").is_err());
    }

    #[test]
    fn test_with_id_injects_key() {
        let doc = Document {
            key: "p1".to_string(),
            fields: json!({"name": "Kanga"}).as_object().unwrap().clone(),
        };
        let fields = doc.with_id();
        assert_eq!(fields.get("id"), Some(&json!("p1")));
    }

    #[test]
    fn test_with_id_keeps_stored_id() {
        let doc = Document {
            key: "p1".to_string(),
            fields: json!({"id": "legacy-7"}).as_object().unwrap().clone(),
        };
        assert_eq!(doc.with_id().get("id"), Some(&json!("legacy-7")));
    }
}
