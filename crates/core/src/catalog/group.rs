//! Variant grouping.
//!
//! Products that share a `groupId` are variants of one logical item. The
//! storefront shows them as a single card carrying the lowest variant price
//! and the number of variants.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::product::{Product, effective_category};
use crate::types::{GroupId, ProductId, RawPrice};

/// The unit rendered in a rail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayItem {
    /// A product without a group, unchanged.
    Standalone(Product),
    /// All variants sharing one group ID.
    Group(ProductGroup),
}

impl DisplayItem {
    /// Name shown on the card.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Standalone(p) => &p.name,
            Self::Group(g) => &g.name,
        }
    }

    /// Category the item is placed under.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Standalone(p) => p.effective_category(),
            Self::Group(g) => effective_category(g.category.as_deref()),
        }
    }

    /// Identity of the item: product ID for standalone items, group ID for groups.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Standalone(p) => p.id.as_str(),
            Self::Group(g) => g.group_id.as_str(),
        }
    }

    /// Whether this item aggregates variants.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

/// Aggregated display of every variant sharing one group ID.
///
/// Name, image, category and description come from the first variant in
/// input order. Only the price is aggregated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductGroup {
    pub group_id: GroupId,
    pub representative_id: ProductId,
    pub name: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Stored price of the representative.
    pub price: Option<RawPrice>,
    /// Lowest valid price across all variants.
    pub min_price: Option<Decimal>,
    /// Variant IDs in input order.
    pub variant_ids: Vec<ProductId>,
}

impl ProductGroup {
    /// Build a group from its variants. `variants[0]` is the representative.
    ///
    /// Returns `None` for an empty variant list.
    #[must_use]
    pub fn from_variants(group_id: GroupId, variants: &[&Product]) -> Option<Self> {
        let representative = *variants.first()?;
        Some(Self {
            group_id,
            representative_id: representative.id.clone(),
            name: representative.name.clone(),
            image: representative.image.clone(),
            category: representative.category.clone(),
            description: representative.description.clone(),
            price: representative.price.clone(),
            min_price: min_price(representative, variants),
            variant_ids: variants.iter().map(|v| v.id.clone()).collect(),
        })
    }

    /// Number of variants in the group.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variant_ids.len()
    }
}

/// Lowest valid price among `variants`.
///
/// Unparsable or missing prices are skipped. When no variant has a valid
/// price, the representative's own price is used, parsed the same way.
#[must_use]
pub fn min_price(representative: &Product, variants: &[&Product]) -> Option<Decimal> {
    variants
        .iter()
        .filter_map(|v| v.parsed_price())
        .min()
        .or_else(|| representative.parsed_price())
}

/// Collapse variants into groups.
///
/// Each group appears once, at the position of its first variant; standalone
/// products keep their original order around it. The input is not modified.
#[must_use]
pub fn group_products(products: &[Product]) -> Vec<DisplayItem> {
    let mut variants: HashMap<&GroupId, Vec<&Product>> = HashMap::new();
    for product in products {
        if let Some(group_id) = product.group_key() {
            variants.entry(group_id).or_default().push(product);
        }
    }

    let mut items = Vec::with_capacity(products.len());
    for product in products {
        match product.group_key() {
            // First sighting drains the entry, later variants find nothing.
            Some(group_id) => {
                let Some(members) = variants.remove(group_id) else {
                    continue;
                };
                if let Some(group) = ProductGroup::from_variants(group_id.clone(), &members) {
                    items.push(DisplayItem::Group(group));
                }
            }
            None => items.push(DisplayItem::Standalone(product.clone())),
        }
    }

    tracing::trace!(
        products = products.len(),
        items = items.len(),
        "grouped catalog products"
    );
    items
}
