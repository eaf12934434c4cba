//! Per-user cart lines under `carts/{user_id}/items`.

use duka_core::{CartItemId, UserId};
use serde_json::{Value, json};

use super::{RepositoryError, decode_all};
use crate::models::CartItem;
use crate::store::{DocumentStore, Fields, StoreError};

/// Outcome of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The new quantity was written.
    Updated,
    /// Quantity below one; nothing was written.
    Rejected,
}

/// Repository for one store's cart documents.
pub struct CartRepository<'a, S> {
    store: &'a S,
}

fn items_collection(user: &UserId) -> String {
    format!("carts/{user}/items")
}

impl<'a, S: DocumentStore> CartRepository<'a, S> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Every line in the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the cart cannot be read.
    pub async fn items(&self, user: &UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let collection = items_collection(user);
        let documents = self.store.list(&collection).await?;
        Ok(decode_all(&collection, documents))
    }

    /// Set a line's quantity. Quantities below one are rejected without a
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line does not exist.
    pub async fn update_quantity(
        &self,
        user: &UserId,
        item: &CartItemId,
        quantity: i64,
    ) -> Result<QuantityUpdate, RepositoryError> {
        if quantity < 1 {
            return Ok(QuantityUpdate::Rejected);
        }

        let mut fields = Fields::new();
        fields.insert("quantity".to_string(), json!(quantity));

        self.store
            .update(&items_collection(user), item.as_str(), fields)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => RepositoryError::NotFound,
                other => RepositoryError::Store(other),
            })?;
        Ok(QuantityUpdate::Updated)
    }

    /// Remove a line. Removing a missing line succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the delete fails.
    pub async fn remove(&self, user: &UserId, item: &CartItemId) -> Result<(), RepositoryError> {
        self.store
            .delete(&items_collection(user), item.as_str())
            .await?;
        Ok(())
    }

    /// Write a line, replacing one with the same id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the item cannot be
    /// encoded, or `RepositoryError::Store` if the write fails.
    pub async fn put(&self, user: &UserId, item: &CartItem) -> Result<(), RepositoryError> {
        let Value::Object(mut fields) = serde_json::to_value(item)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?
        else {
            return Err(RepositoryError::DataCorruption(
                "cart item did not encode to an object".to_string(),
            ));
        };
        fields.remove("id");
        self.store
            .insert(&items_collection(user), item.id.as_str(), fields)
            .await?;
        Ok(())
    }
}
