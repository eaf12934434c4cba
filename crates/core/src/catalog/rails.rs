//! Filtering, per-category rails and the per-rail item cap.

use std::num::NonZeroUsize;

use serde::Serialize;

use super::error::CatalogError;
use super::group::{DisplayItem, group_products};
use super::product::{Category, Product, display_categories};

/// Maximum number of items rendered in one rail.
///
/// Zero is not representable; build one with [`RailCap::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RailCap(NonZeroUsize);

impl RailCap {
    /// Items per rail on the home page.
    pub const DEFAULT: Self = Self(NonZeroUsize::MIN.saturating_add(7));

    /// Validate a configured cap.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidRailCap` for zero or negative values.
    pub fn new(cap: i64) -> Result<Self, CatalogError> {
        usize::try_from(cap)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(CatalogError::InvalidRailCap(cap))
    }

    /// The cap as a plain count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for RailCap {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for RailCap {
    type Error = CatalogError;

    fn try_from(cap: i64) -> Result<Self, Self::Error> {
        Self::new(cap)
    }
}

/// Keep the first `cap` items and report whether any were cut.
#[must_use]
pub fn cap_to_limit(mut items: Vec<DisplayItem>, cap: RailCap) -> (Vec<DisplayItem>, bool) {
    let has_more = items.len() > cap.get();
    items.truncate(cap.get());
    (items, has_more)
}

/// Search and category predicate for display items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RailFilter {
    query: String,
    category: Option<String>,
}

impl RailFilter {
    /// Build a filter. The query is trimmed and matched case-insensitively.
    #[must_use]
    pub fn new(query: &str, category: Option<&str>) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            category: category.map(str::to_owned),
        }
    }

    /// Whether `item` passes both the search and the category predicate.
    #[must_use]
    pub fn matches(&self, item: &DisplayItem) -> bool {
        let matches_search =
            self.query.is_empty() || item.name().to_lowercase().contains(&self.query);
        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|selected| item.category() == selected);
        matches_search && matches_category
    }
}

/// Items passing `filter`, in input order.
#[must_use]
pub fn filter_items(items: &[DisplayItem], filter: &RailFilter) -> Vec<DisplayItem> {
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

/// One category's items, before capping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rail {
    pub category: Category,
    pub items: Vec<DisplayItem>,
}

impl Rail {
    /// Apply the per-rail cap.
    #[must_use]
    pub fn cap(self, cap: RailCap) -> CappedRail {
        let total = self.items.len();
        let (items, has_more) = cap_to_limit(self.items, cap);
        CappedRail {
            category: self.category,
            items,
            has_more,
            total,
        }
    }
}

/// A rail ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CappedRail {
    pub category: Category,
    pub items: Vec<DisplayItem>,
    /// More items exist than are shown; render a "View All" link instead.
    pub has_more: bool,
    /// Item count before capping.
    pub total: usize,
}

/// Split items into one rail per category.
///
/// Within a rail, groups come first in the order they were encountered,
/// then standalone products in their original order. Categories with no
/// items produce no rail.
#[must_use]
pub fn partition(items: &[DisplayItem], categories: &[Category]) -> Vec<Rail> {
    categories
        .iter()
        .filter_map(|category| {
            let (groups, standalone): (Vec<&DisplayItem>, Vec<&DisplayItem>) = items
                .iter()
                .filter(|item| item.category() == category.id.as_str())
                .partition(|item| item.is_group());

            if groups.is_empty() && standalone.is_empty() {
                return None;
            }

            Some(Rail {
                category: category.clone(),
                items: groups.into_iter().chain(standalone).cloned().collect(),
            })
        })
        .collect()
}

/// Filter items by search query and selected category, then split them into rails.
#[must_use]
pub fn filter_and_partition(
    items: &[DisplayItem],
    query: &str,
    selected_category: Option<&str>,
    categories: &[Category],
) -> Vec<Rail> {
    let filter = RailFilter::new(query, selected_category);
    partition(&filter_items(items, &filter), categories)
}

/// Result of browsing the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Browse {
    pub rails: Vec<CappedRail>,
    /// Items that passed the filter across all categories.
    pub matched: usize,
}

impl Browse {
    /// Whether the filter matched nothing at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.matched == 0
    }
}

/// A fetched catalog with its grouped display items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    items: Vec<DisplayItem>,
}

impl Catalog {
    /// Group the products and resolve the categories to lay rails out by.
    #[must_use]
    pub fn new(products: Vec<Product>, categories: &[Category]) -> Self {
        let categories = display_categories(categories, &products);
        let items = group_products(&products);
        Self {
            products,
            categories,
            items,
        }
    }

    /// Raw products as fetched.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Categories rails are laid out by (stored or derived).
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Grouped display items in catalog order.
    #[must_use]
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Filter, partition and cap the catalog into rails.
    #[must_use]
    pub fn browse(&self, query: &str, selected_category: Option<&str>, cap: RailCap) -> Browse {
        let filter = RailFilter::new(query, selected_category);
        let matched = filter_items(&self.items, &filter);
        let rails = partition(&matched, &self.categories)
            .into_iter()
            .map(|rail| rail.cap(cap))
            .collect();

        Browse {
            rails,
            matched: matched.len(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{GroupId, ProductId, RawPrice};
    use proptest::prelude::*;

    fn product(id: &str, name: &str, category: &str, group: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: Some(category.to_string()),
            price: Some(RawPrice::Number(1000.0)),
            group_id: group.map(GroupId::new),
            ..Product::default()
        }
    }

    fn standalone(n: usize) -> Vec<DisplayItem> {
        (0..n)
            .map(|i| DisplayItem::Standalone(product(&format!("p{i}"), "Item", "shoes", None)))
            .collect()
    }

    fn categories() -> Vec<Category> {
        vec![Category::new("shoes", "Shoes"), Category::new("bags", "Bags")]
    }

    #[test]
    fn test_rail_cap_rejects_non_positive() {
        assert_eq!(RailCap::new(0), Err(CatalogError::InvalidRailCap(0)));
        assert_eq!(RailCap::new(-3), Err(CatalogError::InvalidRailCap(-3)));
        assert_eq!(RailCap::new(5).unwrap().get(), 5);
        assert_eq!(RailCap::default().get(), 8);
    }

    #[test]
    fn test_cap_to_limit_cuts_long_rails() {
        let (items, has_more) = cap_to_limit(standalone(12), RailCap::DEFAULT);
        assert_eq!(items.len(), 8);
        assert!(has_more);
        assert_eq!(items[7].key(), "p7");
    }

    #[test]
    fn test_cap_to_limit_keeps_short_rails() {
        let (items, has_more) = cap_to_limit(standalone(8), RailCap::DEFAULT);
        assert_eq!(items.len(), 8);
        assert!(!has_more);

        let (items, has_more) = cap_to_limit(standalone(3), RailCap::DEFAULT);
        assert_eq!(items.len(), 3);
        assert!(!has_more);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let items = group_products(&[
            product("a", "Leather Boot", "shoes", None),
            product("b", "Canvas Tote", "bags", None),
        ]);
        let filter = RailFilter::new("  BOOT ", None);
        let matched = filter_items(&items, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].key(), "a");

        assert_eq!(filter_items(&items, &RailFilter::new("", None)).len(), 2);
    }

    #[test]
    fn test_search_and_category_are_anded() {
        let items = group_products(&[
            product("a", "Red Boot", "shoes", None),
            product("b", "Red Tote", "bags", None),
            product("c", "Blue Boot", "shoes", None),
        ]);
        let rails = filter_and_partition(&items, "red", Some("shoes"), &categories());
        assert_eq!(rails.len(), 1);
        assert_eq!(rails[0].category.id.as_str(), "shoes");
        let keys: Vec<&str> = rails[0].items.iter().map(DisplayItem::key).collect();
        assert_eq!(keys, vec!["a"]);
    }

    #[test]
    fn test_groups_lead_each_rail() {
        let items = group_products(&[
            product("s1", "Sock", "shoes", None),
            product("v1", "Runner", "shoes", Some("runner")),
            product("s2", "Lace", "shoes", None),
            product("v2", "Runner", "shoes", Some("runner")),
            product("w1", "Sandal", "shoes", Some("sandal")),
            product("t1", "Tote", "bags", None),
        ]);
        let rails = filter_and_partition(&items, "", None, &categories());
        assert_eq!(rails.len(), 2);

        let shoes: Vec<&str> = rails[0].items.iter().map(DisplayItem::key).collect();
        assert_eq!(shoes, vec!["runner", "sandal", "s1", "s2"]);

        let bags: Vec<&str> = rails[1].items.iter().map(DisplayItem::key).collect();
        assert_eq!(bags, vec!["t1"]);
    }

    #[test]
    fn test_empty_categories_produce_no_rail() {
        let items = group_products(&[product("a", "Boot", "shoes", None)]);
        let rails = filter_and_partition(&items, "", None, &categories());
        assert_eq!(rails.len(), 1);
        assert_eq!(rails[0].category.id.as_str(), "shoes");
    }

    #[test]
    fn test_uncategorized_products_get_a_rail() {
        let mut loose = product("x", "Mystery Box", "ignored", None);
        loose.category = None;
        let catalog = Catalog::new(vec![loose], &[]);
        let browse = catalog.browse("", None, RailCap::DEFAULT);
        assert_eq!(browse.rails.len(), 1);
        assert_eq!(browse.rails[0].category.name, "Uncategorized");
        assert_eq!(browse.rails[0].items[0].key(), "x");
    }

    #[test]
    fn test_browse_caps_and_counts() {
        let products: Vec<Product> = (0..12)
            .map(|i| product(&format!("p{i}"), "Boot", "shoes", None))
            .collect();
        let catalog = Catalog::new(products, &categories());
        let browse = catalog.browse("", None, RailCap::DEFAULT);
        assert_eq!(browse.matched, 12);
        assert_eq!(browse.rails.len(), 1);
        assert_eq!(browse.rails[0].items.len(), 8);
        assert_eq!(browse.rails[0].total, 12);
        assert!(browse.rails[0].has_more);

        let none = catalog.browse("umbrella", None, RailCap::DEFAULT);
        assert!(none.is_empty());
        assert!(none.rails.is_empty());
    }

    fn arb_product() -> impl Strategy<Value = Product> {
        (
            "[a-z]{1,4}",
            prop_oneof![Just("Boot"), Just("boot strap"), Just("Tote"), Just("Sock")],
            prop_oneof![Just("shoes"), Just("bags"), Just("hats")],
            prop::option::of(prop_oneof![Just("g1"), Just("g2")]),
        )
            .prop_map(|(id, name, category, group)| product(&id, name, category, group))
    }

    proptest! {
        #[test]
        fn prop_filter_and_partition_is_idempotent(
            products in prop::collection::vec(arb_product(), 0..30),
            query in prop_oneof![Just(""), Just("boot"), Just("TO")],
            selected in prop::option::of(prop_oneof![Just("shoes"), Just("bags")]),
        ) {
            let items = group_products(&products);
            let cats = categories();
            let once = filter_and_partition(&items, query, selected, &cats);
            let flattened: Vec<DisplayItem> =
                once.iter().flat_map(|rail| rail.items.iter().cloned()).collect();
            let twice = filter_and_partition(&flattened, query, selected, &cats);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_groups_before_standalone_in_relative_order(
            products in prop::collection::vec(arb_product(), 0..30),
        ) {
            let items = group_products(&products);
            for rail in filter_and_partition(&items, "", None, &categories()) {
                let first_standalone = rail.items.iter().position(|i| !i.is_group());
                if let Some(boundary) = first_standalone {
                    prop_assert!(rail.items[boundary..].iter().all(|i| !i.is_group()));
                }

                let expected: Vec<&str> = items
                    .iter()
                    .filter(|i| i.category() == rail.category.id.as_str())
                    .filter(|i| i.is_group())
                    .chain(
                        items
                            .iter()
                            .filter(|i| i.category() == rail.category.id.as_str())
                            .filter(|i| !i.is_group()),
                    )
                    .map(DisplayItem::key)
                    .collect();
                let actual: Vec<&str> = rail.items.iter().map(DisplayItem::key).collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
