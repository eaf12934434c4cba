//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Home page (category rails)
//! GET  /health                        - Health check
//!
//! # Cart (requires user)
//! GET  /cart                          - Cart page
//! POST /cart/update                   - Change quantity, redirects to /cart
//! POST /cart/remove                   - Remove item, redirects to /cart
//!
//! # Admin (requires user)
//! GET  /admin/orders                  - Order console (?q=&status=)
//! POST /admin/orders/{id}/status      - Change status, redirects back
//! ```

pub mod admin;
pub mod cart;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin::orders::index))
        .route("/orders/{id}/status", post(admin::orders::update_status))
}

/// Build the complete storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .nest("/admin", admin_routes())
}
