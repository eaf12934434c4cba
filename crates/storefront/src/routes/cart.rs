//! Cart route handlers.
//!
//! Changes are plain form posts that redirect back to the cart page, so the
//! page always shows freshly fetched items.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use duka_core::{CartItemId, CurrencyCode};
use serde::Deserialize;
use tracing::instrument;

use crate::db::{CartRepository, QuantityUpdate};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::{CartItem, cart_total};
use crate::navigation::{NavItem, nav_items};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// Quantity the minus button submits; zero is ignored on the server.
    pub decrement: i64,
    pub increment: i64,
}

impl CartItemView {
    fn new(item: &CartItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: filters::money(item.unit_price(), currency),
            line_price: filters::money(item.line_total(), currency),
            decrement: i64::from(item.quantity) - 1,
            increment: i64::from(item.quantity) + 1,
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
}

impl CartView {
    #[must_use]
    pub fn new(items: &[CartItem], currency: CurrencyCode) -> Self {
        Self {
            items: items
                .iter()
                .map(|item| CartItemView::new(item, currency))
                .collect(),
            total: filters::money(cart_total(items), currency),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: Vec<NavItem>,
    pub cart: CartView,
}

/// Display cart page.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<CartShowTemplate> {
    let items = CartRepository::new(state.store()).items(&user).await?;

    Ok(CartShowTemplate {
        nav: nav_items("/cart", true),
        cart: CartView::new(&items, state.config().currency),
    })
}

/// Change a line's quantity.
#[instrument(skip(state, user))]
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<UpdateCartForm>,
) -> Result<impl IntoResponse> {
    let item = CartItemId::new(form.item_id);
    let outcome = CartRepository::new(state.store())
        .update_quantity(&user, &item, form.quantity)
        .await?;

    match outcome {
        QuantityUpdate::Updated => {
            let quantity = form.quantity.to_string();
            add_breadcrumb(
                "cart",
                "Changed quantity",
                Some(&[("item_id", item.as_str()), ("quantity", quantity.as_str())]),
            );
        }
        QuantityUpdate::Rejected => {
            tracing::debug!(item_id = %item, quantity = form.quantity, "quantity below one ignored");
        }
    }

    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(state, user))]
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<impl IntoResponse> {
    let item = CartItemId::new(form.item_id);
    CartRepository::new(state.store())
        .remove(&user, &item)
        .await?;
    add_breadcrumb("cart", "Removed item", Some(&[("item_id", item.as_str())]));

    Ok(Redirect::to("/cart"))
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use duka_core::RawPrice;

    use super::*;

    #[test]
    fn test_cart_view_formats_lines_and_total() {
        let items = vec![
            CartItem {
                id: CartItemId::new("i1"),
                name: "Kanga".to_string(),
                price: Some(RawPrice::Number(12_000.0)),
                quantity: 2,
                ..CartItem::default()
            },
            CartItem {
                id: CartItemId::new("i2"),
                name: "Kikoi".to_string(),
                price: Some(RawPrice::from("3500")),
                quantity: 1,
                ..CartItem::default()
            },
        ];

        let view = CartView::new(&items, CurrencyCode::TZS);
        assert_eq!(view.total, "TZS 27,500");
        assert_eq!(view.items[0].line_price, "TZS 24,000");
        assert_eq!(view.items[0].decrement, 1);
        assert_eq!(view.items[1].decrement, 0);
        assert_eq!(view.items[1].increment, 2);
    }

    #[test]
    fn test_empty_cart() {
        let view = CartView::new(&[], CurrencyCode::TZS);
        assert!(view.is_empty());
        assert_eq!(view.total, "TZS 0");
    }
}
