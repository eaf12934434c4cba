//! Product and category records as fetched from the document store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, GroupId, ProductId, RawPrice};

/// Category identifier used for products without one.
pub const UNCATEGORIZED_ID: &str = "uncategorized";

/// Display name of the synthetic category for products without one.
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// A purchasable product record.
///
/// Read-only from the catalog's point of view. The `id` is the document key
/// and is injected by the repository when the record is decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default)]
    pub old_price: Option<RawPrice>,
    /// Shared by every variant of one logical item (e.g. sizes of a shoe).
    #[serde(default)]
    pub group_id: Option<GroupId>,
}

impl Product {
    /// The group this product belongs to. Blank group IDs count as none.
    #[must_use]
    pub fn group_key(&self) -> Option<&GroupId> {
        self.group_id.as_ref().filter(|id| !id.is_blank())
    }

    /// Category used for filtering and rail placement.
    ///
    /// Products without a category land in [`UNCATEGORIZED_ID`].
    #[must_use]
    pub fn effective_category(&self) -> &str {
        effective_category(self.category.as_deref())
    }

    /// Parsed price, if the stored value is a valid amount.
    #[must_use]
    pub fn parsed_price(&self) -> Option<Decimal> {
        self.price.as_ref().and_then(RawPrice::parse)
    }

    /// Parsed comparison ("was") price.
    #[must_use]
    pub fn parsed_old_price(&self) -> Option<Decimal> {
        self.old_price.as_ref().and_then(RawPrice::parse)
    }
}

/// Map an optional stored category to the category a rail is keyed by.
#[must_use]
pub fn effective_category(category: Option<&str>) -> &str {
    match category {
        Some(c) if !c.is_empty() => c,
        _ => UNCATEGORIZED_ID,
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
}

impl Category {
    /// Create a category.
    #[must_use]
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Categories to lay rails out by.
///
/// Returns `categories` unchanged when non-empty. Otherwise derives one
/// category per distinct product category in first-seen order, so rails
/// never vanish just because the category collection is empty.
#[must_use]
pub fn display_categories(categories: &[Category], products: &[Product]) -> Vec<Category> {
    if !categories.is_empty() {
        return categories.to_vec();
    }

    let mut derived: Vec<Category> = Vec::new();
    for product in products {
        let id = product.effective_category();
        if derived.iter().any(|c| c.id.as_str() == id) {
            continue;
        }
        let name = match product.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => UNCATEGORIZED_NAME,
        };
        derived.push(Category::new(id, name));
    }
    derived
}
