//! Cart line items stored under `carts/{user_id}/items`.

use duka_core::{CartItemId, ProductId, RawPrice};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line in a user's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(default)]
    pub id: CartItemId,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl CartItem {
    /// Unit price, zero when the stored price is unusable.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.price
            .as_ref()
            .and_then(RawPrice::parse)
            .unwrap_or_default()
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}

/// Sum of every line total.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::line_total).sum()
}
