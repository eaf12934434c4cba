//! Domain models for storefront documents.
//!
//! Field names follow the stored documents (camelCase). Every field is
//! optional on read so that hand-edited documents still decode.

pub mod cart;
pub mod order;

pub use cart::{CartItem, cart_total};
pub use order::{LineItem, Order, OrderQuery, ShippingDetails, StatusFilter};
