//! Order reads and status updates for the admin console.

use chrono::{SecondsFormat, Utc};
use duka_core::{OrderId, OrderStatus};
use serde_json::json;

use super::{RepositoryError, decode, decode_all};
use crate::models::Order;
use crate::models::order::sort_newest_first;
use crate::store::{DocumentStore, Fields, StoreError};

const ORDERS: &str = "orders";

/// Repository for order documents.
pub struct OrderRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: DocumentStore> OrderRepository<'a, S> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Every order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn list_newest_first(&self) -> Result<Vec<Order>, RepositoryError> {
        let documents = self.store.list(ORDERS).await?;
        let mut orders: Vec<Order> = decode_all(ORDERS, documents);
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    /// One order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored document does
    /// not decode.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        self.store
            .get(ORDERS, id.as_str())
            .await?
            .map(|document| decode(ORDERS, document))
            .transpose()
    }

    /// Set an order's status and stamp `updatedAt` with the current time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist.
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: &OrderStatus,
    ) -> Result<(), RepositoryError> {
        let mut fields = Fields::new();
        fields.insert("status".to_string(), json!(status.as_str()));
        fields.insert(
            "updatedAt".to_string(),
            json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        self.store
            .update(ORDERS, id.as_str(), fields)
            .await
            .map_err(|e| match e {
                StoreError::NotFound { .. } => RepositoryError::NotFound,
                other => RepositoryError::Store(other),
            })
    }
}
