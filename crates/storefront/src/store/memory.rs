use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, Fields, StoreError, validate_collection};

type Collections = HashMap<String, BTreeMap<String, Fields>>;

/// In-process document store.
///
/// Cheap to clone; clones share the same data. Documents within a
/// collection are kept ordered by key.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `{collection: {key: document}}` JSON.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Seed` if the value has the wrong shape, or
    /// `StoreError::InvalidPath` for a malformed collection name.
    pub fn from_seed(seed: Value) -> Result<Self, StoreError> {
        let Value::Object(collections) = seed else {
            return Err(StoreError::Seed("top level must be an object".to_string()));
        };

        let mut data = Collections::new();
        for (collection, documents) in collections {
            validate_collection(&collection)?;
            let Value::Object(documents) = documents else {
                return Err(StoreError::Seed(format!(
                    "collection {collection:?} must map keys to documents"
                )));
            };

            let mut docs = BTreeMap::new();
            for (key, document) in documents {
                let Value::Object(fields) = document else {
                    return Err(StoreError::Seed(format!(
                        "document {collection}/{key} must be an object"
                    )));
                };
                docs.insert(key, fields);
            }
            data.insert(collection, docs);
        }

        Ok(Self {
            collections: Arc::new(RwLock::new(data)),
        })
    }

    /// Read and parse a seed file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read and
    /// `StoreError::Seed` if it is not valid seed JSON.
    pub async fn from_path(path: &Path) -> Result<Self, StoreError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let seed: Value =
            serde_json::from_str(&raw).map_err(|e| StoreError::Seed(e.to_string()))?;
        Self::from_seed(seed)
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        validate_collection(collection)?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(key, fields)| Document {
                        key: key.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        validate_collection(collection)?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(key))
            .map(|fields| Document {
                key: key.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn update(&self, collection: &str, key: &str, fields: Fields) -> Result<(), StoreError> {
        validate_collection(collection)?;
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(key))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            })?;
        document.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        validate_collection(collection)?;
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }

    async fn insert(&self, collection: &str, key: &str, fields: Fields) -> Result<(), StoreError> {
        validate_collection(collection)?;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), fields);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Fields {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_seed_and_list_in_key_order() {
        let store = MemoryStore::from_seed(json!({
            "products": {
                "p2": {"name": "Kitenge"},
                "p1": {"name": "Kanga"}
            }
        }))
        .unwrap();

        let docs = store.list("products").await.unwrap();
        let keys: Vec<&str> = docs.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, ["p1", "p2"]);
        assert!(store.list("categories").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::from_seed(json!({
            "orders": {"o1": {"status": "pending", "totalAmount": 5000}}
        }))
        .unwrap();

        store
            .update("orders", "o1", fields(json!({"status": "shipped"})))
            .await
            .unwrap();

        let doc = store.get("orders", "o1").await.unwrap().unwrap();
        assert_eq!(doc.fields["status"], json!("shipped"));
        assert_eq!(doc.fields["totalAmount"], json!(5000));
    }

    #[tokio::test]
    async fn test_update_missing_document() {
        let store = MemoryStore::new();
        let err = store
            .update("orders", "nope", Fields::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_insert_and_delete_nested_collection() {
        let store = MemoryStore::new();
        let items = "carts/u1/items";
        store
            .insert(items, "i1", fields(json!({"quantity": 1})))
            .await
            .unwrap();
        assert_eq!(store.count(items).await, 1);

        store.delete(items, "i1").await.unwrap();
        store.delete(items, "i1").await.unwrap();
        assert_eq!(store.count(items).await, 0);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();
        store
            .insert("categories", "c1", fields(json!({"name": "Shoes"})))
            .await
            .unwrap();
        assert!(other.get("categories", "c1").await.unwrap().is_some());
    }

    #[test]
    fn test_bad_seed_shapes() {
        assert!(matches!(
            MemoryStore::from_seed(json!([1, 2])),
            Err(StoreError::Seed(_))
        ));
        assert!(matches!(
            MemoryStore::from_seed(json!({"products": {"p1": 3}})),
            Err(StoreError::Seed(_))
        ));
        assert!(matches!(
            MemoryStore::from_seed(json!({"carts/u1": {}})),
            Err(StoreError::InvalidPath(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_path_is_rejected() {
        let store = MemoryStore::new();
        assert!(store.list("").await.is_err());
    }
}
