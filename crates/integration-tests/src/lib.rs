//! Integration tests for Duka.
//!
//! Tests drive the full storefront router in-process with
//! `tower::ServiceExt::oneshot`; no server or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p duka-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `home` - Catalog rails, search and category filter
//! - `cart` - Cart page and quantity changes
//! - `admin_orders` - Order console search, filter and status updates
//! - `middleware` - Request IDs, security headers, auth redirect

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use duka_storefront::config::StorefrontConfig;
use duka_storefront::middleware::USER_HEADER;
use duka_storefront::state::AppState;
use duka_storefront::store::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Signed-in user used by the fixtures.
pub const TEST_USER: &str = "user-1";

/// Catalog, carts and orders shared by the tests.
#[must_use]
pub fn fixture() -> Value {
    json!({
        "categories": {
            "bags": {"name": "Bags"},
            "shoes": {"name": "Shoes"}
        },
        "products": {
            "p01": {"name": "Trail Runner", "category": "shoes", "price": "90000", "groupId": "trail"},
            "p02": {"name": "Trail Runner", "category": "shoes", "price": 85000, "groupId": "trail"},
            "p03": {"name": "Beach Sandal", "category": "shoes", "price": 20000, "oldPrice": 25000},
            "p04": {"name": "Kiondo Basket", "category": "bags", "price": "35000"},
            "p05": {"name": "Loafer", "category": "shoes", "price": 40000},
            "p06": {"name": "Mystery Box", "price": "n/a"}
        },
        "carts/user-1/items": {
            "c1": {"productId": "p03", "name": "Beach Sandal", "price": 20000, "quantity": 2},
            "c2": {"productId": "p04", "name": "Kiondo Basket", "price": "35000", "quantity": 1}
        },
        "orders": {
            "ORD-0000-aaaa1111": {
                "status": "pending",
                "totalAmount": 40000,
                "createdAt": "2026-03-01T09:00:00Z",
                "shippingDetails": {"fullName": "Asha Mwinyi", "email": "asha@example.com", "city": "Dodoma"},
                "items": [{"name": "Beach Sandal", "price": 20000, "quantity": 2}]
            },
            "ORD-0000-bbbb2222": {
                "status": "shipped",
                "total": 35000,
                "createdAt": "2026-03-04T15:30:00Z",
                "shippingDetails": {"fullName": "Baraka Otieno", "email": "baraka@example.com", "city": "Arusha"},
                "items": [{"name": "Kiondo Basket", "price": "35000", "quantity": 1}]
            }
        }
    })
}

/// A router over a seeded store, with a handle to inspect the store.
pub struct TestContext {
    pub app: Router,
    pub store: MemoryStore,
}

impl TestContext {
    /// Router seeded with [`fixture`].
    ///
    /// # Panics
    ///
    /// Panics if the fixture is not valid seed data.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(fixture())
    }

    /// Router seeded with `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `seed` is not valid seed data.
    #[must_use]
    pub fn with_seed(seed: Value) -> Self {
        #[allow(clippy::unwrap_used)]
        let store = MemoryStore::from_seed(seed).unwrap();
        let state = AppState::new(StorefrontConfig::default(), store.clone());
        Self {
            app: duka_storefront::app(state),
            store,
        }
    }

    /// Send a request and collect the response.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        #[allow(clippy::unwrap_used)]
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        #[allow(clippy::unwrap_used)]
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// GET `uri`, optionally as a signed-in user.
    pub async fn get(&self, uri: &str, user: Option<&str>) -> TestResponse {
        self.send(request("GET", uri, user, Body::empty())).await
    }

    /// POST a url-encoded form as `user`.
    pub async fn post_form(&self, uri: &str, user: &str, form: &str) -> TestResponse {
        let mut req = request("POST", uri, Some(user), Body::from(form.to_string()));
        req.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        self.send(req).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn request(method: &str, uri: &str, user: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    #[allow(clippy::unwrap_used)]
    builder.body(body).unwrap()
}

/// Collected response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Header value as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Redirect target for 3xx responses.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }
}
