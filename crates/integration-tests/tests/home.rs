//! Home page: rails, grouping, search and category filter.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use duka_integration_tests::{TEST_USER, TestContext};
use serde_json::{Map, Value, json};

fn position(body: &str, needle: &str) -> usize {
    body.find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in page"))
}

#[tokio::test]
async fn test_home_renders_one_rail_per_category() {
    let ctx = TestContext::new();
    let resp = ctx.get("/", None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"data-rail="bags""#));
    assert!(resp.body.contains(r#"data-rail="shoes""#));
    // Stored categories decide the rails; uncategorized products get none.
    assert!(!resp.body.contains("Mystery Box"));
}

#[tokio::test]
async fn test_variants_collapse_into_one_group_card() {
    let ctx = TestContext::new();
    let body = ctx.get("/", None).await.body;

    assert_eq!(body.matches(r#"href="/group/trail""#).count(), 2);
    assert!(body.contains("From TZS 85,000"));
    assert!(body.contains("(2)"));
    assert!(body.contains("View group"));
    assert!(body.contains(r#"href="/product/p03""#));
    assert!(body.contains("View a product"));
    assert!(body.contains(r#"<s class="card-old-price">TZS 25,000</s>"#));
}

#[tokio::test]
async fn test_groups_come_before_standalone_items() {
    let ctx = TestContext::new();
    let body = ctx.get("/", None).await.body;

    let shoes = position(&body, r#"data-rail="shoes""#);
    let group = position(&body, r#"data-key="trail""#);
    let sandal = position(&body, r#"data-key="p03""#);
    let loafer = position(&body, r#"data-key="p05""#);
    assert!(shoes < group && group < sandal && sandal < loafer);
}

#[tokio::test]
async fn test_search_filters_items() {
    let ctx = TestContext::new();
    let body = ctx.get("/?q=SANDAL", None).await.body;

    assert!(body.contains("Beach Sandal"));
    assert!(!body.contains("Kiondo Basket"));
    assert!(!body.contains(r#"data-rail="bags""#));
}

#[tokio::test]
async fn test_category_filter() {
    let ctx = TestContext::new();
    let body = ctx.get("/?category=bags", None).await.body;

    assert!(body.contains(r#"data-rail="bags""#));
    assert!(!body.contains(r#"data-rail="shoes""#));
    assert!(body.contains(r#"class="pill is-active">Bags"#));
}

#[tokio::test]
async fn test_blank_category_means_all() {
    let ctx = TestContext::new();
    let body = ctx.get("/?category=", None).await.body;

    assert!(body.contains(r#"data-rail="bags""#));
    assert!(body.contains(r#"data-rail="shoes""#));
    assert!(body.contains(r#"class="pill is-active">All"#));
}

#[tokio::test]
async fn test_no_results() {
    let ctx = TestContext::new();
    let body = ctx.get("/?q=kettle", None).await.body;

    assert!(body.contains("No products found"));
    assert!(body.contains("Clear Filters"));
    assert!(!body.contains("data-rail="));
}

#[tokio::test]
async fn test_rail_is_capped_with_view_all_link() {
    let products: Map<String, Value> = (0..12)
        .map(|i| {
            (
                format!("p{i:02}"),
                json!({"name": format!("Shoe {i}"), "category": "shoes", "price": 1000}),
            )
        })
        .collect();
    let ctx = TestContext::with_seed(json!({
        "categories": {"shoes": {"name": "Shoes"}},
        "products": products,
    }));

    let body = ctx.get("/", None).await.body;
    assert_eq!(body.matches("data-key=").count(), 8);
    assert!(body.contains(r#"href="/products?category=shoes">View All"#));
}

#[tokio::test]
async fn test_short_rail_has_no_view_all_link() {
    let ctx = TestContext::new();
    let body = ctx.get("/", None).await.body;
    assert!(!body.contains("View All"));
}

#[tokio::test]
async fn test_categories_are_derived_when_none_are_stored() {
    let ctx = TestContext::with_seed(json!({
        "products": {
            "p1": {"name": "Kanga", "category": "textiles", "price": 15000},
            "p2": {"name": "Gift Card", "price": 10000}
        }
    }));

    let body = ctx.get("/", None).await.body;
    assert!(body.contains(r#"data-rail="textiles""#));
    assert!(body.contains(r#"data-rail="uncategorized""#));
    assert!(body.contains("Uncategorized"));
}

#[tokio::test]
async fn test_bottom_nav_depends_on_sign_in() {
    let ctx = TestContext::new();

    let anonymous = ctx.get("/", None).await.body;
    assert!(anonymous.contains(r#"class="bottom-nav""#));
    assert!(!anonymous.contains(r#"href="/cart""#));

    let signed_in = ctx.get("/", Some(TEST_USER)).await.body;
    assert!(signed_in.contains(r#"href="/cart""#));
    assert!(signed_in.contains(r#"href="/profile""#));
}
