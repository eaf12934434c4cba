//! Catalog error types.

use thiserror::Error;

/// Errors raised by the catalog pipeline.
///
/// Bad product data never produces an error; only caller misconfiguration does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Rails must show at least one item.
    #[error("rail cap must be at least 1 (got {0})")]
    InvalidRailCap(i64),
}
