//! Catalog reads: products and categories.

use duka_core::catalog::{Category, Product};

use super::{RepositoryError, decode_all};
use crate::store::DocumentStore;

const PRODUCTS: &str = "products";
const CATEGORIES: &str = "categories";

/// Repository for catalog documents.
pub struct CatalogRepository<'a, S> {
    store: &'a S,
}

impl<'a, S: DocumentStore> CatalogRepository<'a, S> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Every product, in key order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn products(&self) -> Result<Vec<Product>, RepositoryError> {
        let documents = self.store.list(PRODUCTS).await?;
        Ok(decode_all(PRODUCTS, documents))
    }

    /// Every stored category, in key order. May be empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the collection cannot be read.
    pub async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let documents = self.store.list(CATEGORIES).await?;
        Ok(decode_all(CATEGORIES, documents))
    }

    /// Products and categories, fetched concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first store error encountered.
    pub async fn snapshot(&self) -> Result<(Vec<Product>, Vec<Category>), RepositoryError> {
        tokio::try_join!(self.products(), self.categories())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use duka_core::ProductId;
    use serde_json::json;

    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_products_take_id_from_key() {
        let store = MemoryStore::from_seed(json!({
            "products": {
                "p1": {"name": "Kanga", "price": "12000", "category": "textiles"},
                "p2": {"name": "Kikoi", "price": 9000}
            },
            "categories": {
                "textiles": {"name": "Textiles"}
            }
        }))
        .unwrap();

        let repo = CatalogRepository::new(&store);
        let (products, categories) = repo.snapshot().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId::new("p1"));
        assert_eq!(products[1].effective_category(), "uncategorized");
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id.as_str(), "textiles");
    }

    #[tokio::test]
    async fn test_malformed_products_are_skipped() {
        let store = MemoryStore::from_seed(json!({
            "products": {
                "p1": {"name": 42},
                "p2": {"name": "Kikoi"}
            }
        }))
        .unwrap();

        let products = CatalogRepository::new(&store).products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Kikoi");
    }
}
