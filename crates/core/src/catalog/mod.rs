//! Catalog pipeline: raw products in, capped per-category rails out.
//!
//! ```text
//! products ──group_products──▶ display items ──filter──▶ partition by category ──cap──▶ rails
//! ```
//!
//! Every stage is pure and synchronous. Inputs are borrowed and never mutated.
//!
//! # Example
//!
//! ```rust
//! use duka_core::catalog::{Catalog, Category, Product, RailCap};
//! use duka_core::{GroupId, ProductId, RawPrice};
//!
//! let variant = |id: &str, price: f64| Product {
//!     id: ProductId::new(id),
//!     name: "Trail Runner".to_string(),
//!     category: Some("shoes".to_string()),
//!     price: Some(RawPrice::Number(price)),
//!     group_id: Some(GroupId::new("trail-runner")),
//!     ..Product::default()
//! };
//!
//! let catalog = Catalog::new(
//!     vec![variant("tr-41", 90_000.0), variant("tr-42", 85_000.0)],
//!     &[Category::new("shoes", "Shoes")],
//! );
//! let browse = catalog.browse("trail", None, RailCap::DEFAULT);
//!
//! assert_eq!(browse.rails.len(), 1);
//! assert_eq!(browse.rails[0].items.len(), 1);
//! ```

pub mod error;
pub mod group;
pub mod product;
pub mod rails;

pub use error::CatalogError;
pub use group::{DisplayItem, ProductGroup, group_products, min_price};
pub use product::{
    Category, Product, UNCATEGORIZED_ID, UNCATEGORIZED_NAME, display_categories,
    effective_category,
};
pub use rails::{
    Browse, CappedRail, Catalog, Rail, RailCap, RailFilter, cap_to_limit, filter_and_partition,
    filter_items, partition,
};
