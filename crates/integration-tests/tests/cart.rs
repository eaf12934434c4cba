//! Cart page and cart changes.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use duka_integration_tests::{TEST_USER, TestContext};
use duka_storefront::store::DocumentStore;

const ITEMS: &str = "carts/user-1/items";

async fn quantity(ctx: &TestContext, item: &str) -> Option<u64> {
    ctx.store
        .get(ITEMS, item)
        .await
        .unwrap()
        .and_then(|doc| doc.fields.get("quantity").and_then(serde_json::Value::as_u64))
}

#[tokio::test]
async fn test_cart_requires_user() {
    let ctx = TestContext::new();
    let resp = ctx.get("/cart", None).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/login"));
}

#[tokio::test]
async fn test_cart_shows_lines_and_total() {
    let ctx = TestContext::new();
    let resp = ctx.get("/cart", Some(TEST_USER)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Beach Sandal"));
    assert!(resp.body.contains("TZS 40,000"));
    assert!(resp.body.contains("<strong>TZS 75,000</strong>"));
    // No Cart entry in the bottom bar while on the cart page.
    assert!(!resp.body.contains(r#"href="/cart""#));
    assert!(resp.body.contains(r#"href="/wishlist""#));
}

#[tokio::test]
async fn test_empty_cart() {
    let ctx = TestContext::new();
    let body = ctx.get("/cart", Some("someone-else")).await.body;

    assert!(body.contains("Your cart is empty."));
    assert!(body.contains(r#"href="/products">Continue Shopping"#));
}

#[tokio::test]
async fn test_update_quantity() {
    let ctx = TestContext::new();
    let resp = ctx
        .post_form("/cart/update", TEST_USER, "item_id=c1&quantity=3")
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));
    assert_eq!(quantity(&ctx, "c1").await, Some(3));

    let body = ctx.get("/cart", Some(TEST_USER)).await.body;
    assert!(body.contains("<strong>TZS 95,000</strong>"));
}

#[tokio::test]
async fn test_quantity_below_one_is_ignored() {
    let ctx = TestContext::new();
    for quantity_value in ["0", "-4"] {
        let resp = ctx
            .post_form(
                "/cart/update",
                TEST_USER,
                &format!("item_id=c1&quantity={quantity_value}"),
            )
            .await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER);
    }
    assert_eq!(quantity(&ctx, "c1").await, Some(2));
}

#[tokio::test]
async fn test_update_unknown_item() {
    let ctx = TestContext::new();
    let resp = ctx
        .post_form("/cart/update", TEST_USER, "item_id=missing&quantity=2")
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_item() {
    let ctx = TestContext::new();
    let resp = ctx.post_form("/cart/remove", TEST_USER, "item_id=c2").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(ctx.store.get(ITEMS, "c2").await.unwrap().is_none());

    let body = ctx.get("/cart", Some(TEST_USER)).await.body;
    assert!(!body.contains("Kiondo Basket"));
    assert!(body.contains("<strong>TZS 40,000</strong>"));
}

#[tokio::test]
async fn test_changes_require_user() {
    let ctx = TestContext::new();
    let resp = ctx
        .send(
            axum::http::Request::builder()
                .method("POST")
                .uri("/cart/remove")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(axum::body::Body::from("item_id=c2"))
                .unwrap(),
        )
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/login"));
    assert!(ctx.store.get(ITEMS, "c2").await.unwrap().is_some());
}
