//! Typed repositories over the document store.
//!
//! # Collections
//!
//! - `products` - Catalog products (read-only here)
//! - `categories` - Catalog categories (read-only here)
//! - `orders` - Customer orders; the admin console updates `status`
//! - `carts/{user_id}/items` - Per-user cart lines
//!
//! Documents are decoded with `serde_json`; the document key becomes the
//! record's `id`.

pub mod carts;
pub mod catalog;
pub mod orders;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::store::{Document, StoreError};

pub use carts::{CartRepository, QuantityUpdate};
pub use catalog::CatalogRepository;
pub use orders::OrderRepository;

/// Errors that can occur in repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Document store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Stored document does not match the expected shape.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Decode one document, injecting its key as `id`.
fn decode<T: DeserializeOwned>(collection: &str, document: Document) -> Result<T, RepositoryError> {
    let key = document.key.clone();
    serde_json::from_value(Value::Object(document.with_id())).map_err(|e| {
        RepositoryError::DataCorruption(format!("{collection}/{key}: {e}"))
    })
}

/// Decode every document, skipping (and logging) the ones that do not fit.
fn decode_all<T: DeserializeOwned>(collection: &str, documents: Vec<Document>) -> Vec<T> {
    documents
        .into_iter()
        .filter_map(|document| match decode(collection, document) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed document");
                None
            }
        })
        .collect()
}
