//! Integration tests for shops, products and coupons.
//!
//! These tests require:
//! - A running `PostgreSQL` database seeded with the demo catalog
//!   (`bloom-cli seed --reset`)
//! - The API server running (cargo run -p bloom-api)
//!
//! Run with: cargo test -p bloom-integration-tests -- --ignored

use std::collections::BTreeSet;

use bloom_integration_tests::{api_url, base_url, client};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn get_json(url: &str) -> (StatusCode, Value) {
    let resp = client()
        .get(url)
        .send()
        .await
        .expect("Failed to send request");
    let status = resp.status();
    let body = resp.json().await.expect("Response was not JSON");
    (status, body)
}

/// Id of the seeded shop at `index`.
async fn shop_id(index: usize) -> i64 {
    let (_, shops) = get_json(&api_url("/shops")).await;
    shops[index]["id"].as_i64().expect("Shop without id")
}

/// Id of the first seeded shop.
async fn first_shop_id() -> i64 {
    shop_id(0).await
}

fn product_ids(page: &Value) -> BTreeSet<i64> {
    page["products"]
        .as_array()
        .expect("Expected products")
        .iter()
        .filter_map(|p| p["id"].as_i64())
        .collect()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_banner_and_readiness() {
    let (status, body) = get_json(&base_url()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let resp = client()
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Shops & Products
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_list_shops() {
    let (status, body) = get_json(&api_url("/shops")).await;
    assert_eq!(status, StatusCode::OK);

    let shops = body.as_array().expect("Expected an array of shops");
    assert_eq!(shops.len(), 3);
    assert!(shops.iter().all(|s| s["name"].is_string() && s["address"].is_string()));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_products_sorted_by_price() {
    let shop_id = first_shop_id().await;
    let (status, body) = get_json(&api_url(&format!(
        "/shops/{shop_id}/products?sortBy=price&sortOrder=asc"
    )))
    .await;
    assert_eq!(status, StatusCode::OK);

    let prices: Vec<f64> = body
        .as_array()
        .expect("Expected an array of products")
        .iter()
        .filter_map(|p| p["price"].as_f64())
        .collect();
    assert_eq!(prices.len(), 12);
    assert!(prices.windows(2).all(|w| w[0] <= w[1]), "{prices:?}");
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_paginated_products_second_page() {
    let shop_id = first_shop_id().await;
    let (status, body) = get_json(&api_url(&format!(
        "/shops/{shop_id}/products/paginated?page=2&limit=6"
    )))
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["products"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["totalCount"], 12);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["currentPage"], 2);
    assert_eq!(body["hasNextPage"], false);
    assert_eq!(body["hasPreviousPage"], true);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_pages_partition_products() {
    // Second shop: favorites there are not toggled by other tests
    let shop_id = shop_id(1).await;
    let page_url = |page: u32| {
        api_url(&format!(
            "/shops/{shop_id}/products/paginated?page={page}&limit=6&sortBy=price&sortOrder=asc"
        ))
    };

    let (_, first) = get_json(&page_url(1)).await;
    let (_, second) = get_json(&page_url(2)).await;
    assert_eq!(first["hasNextPage"], true);
    assert_eq!(first["hasPreviousPage"], false);

    let first_ids = product_ids(&first);
    let second_ids = product_ids(&second);
    assert_eq!(first_ids.len(), 6);
    assert_eq!(second_ids.len(), 6);
    assert!(first_ids.is_disjoint(&second_ids));

    let (_, all) = get_json(&api_url(&format!("/shops/{shop_id}/products"))).await;
    let all_ids: BTreeSet<i64> = all
        .as_array()
        .expect("Expected an array of products")
        .iter()
        .filter_map(|p| p["id"].as_i64())
        .collect();
    let paged: BTreeSet<i64> = first_ids.union(&second_ids).copied().collect();
    assert_eq!(paged, all_ids);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_paginated_favorites_first() {
    let shop_id = first_shop_id().await;
    let (_, body) = get_json(&api_url(&format!(
        "/shops/{shop_id}/products/paginated?page=1&limit=12&sortBy=price"
    )))
    .await;

    let products = body["products"].as_array().expect("Expected products");
    let first_plain = products
        .iter()
        .position(|p| p["isFavorite"] == false)
        .unwrap_or(products.len());
    assert!(
        products.iter().skip(first_plain).all(|p| p["isFavorite"] == false),
        "favorites must come before other products"
    );
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_toggle_favorite() {
    let shop_id = first_shop_id().await;
    let (_, products) = get_json(&api_url(&format!("/shops/{shop_id}/products"))).await;
    let product = &products[0];
    let id = product["id"].as_i64().expect("Product without id");
    let original = product["isFavorite"].as_bool().expect("isFavorite missing");

    for value in [!original, original] {
        let resp = client()
            .patch(api_url(&format!("/products/{id}/favorite")))
            .json(&json!({ "isFavorite": value }))
            .send()
            .await
            .expect("Failed to toggle favorite");
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.expect("Response was not JSON");
        assert_eq!(body["isFavorite"], value);
    }
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_favorite_unknown_product() {
    let resp = client()
        .patch(api_url("/products/999999/favorite"))
        .json(&json!({ "isFavorite": true }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Coupons
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_list_active_coupons() {
    let (status, body) = get_json(&api_url("/coupons")).await;
    assert_eq!(status, StatusCode::OK);

    let codes: Vec<&str> = body
        .as_array()
        .expect("Expected an array of coupons")
        .iter()
        .filter_map(|c| c["code"].as_str())
        .collect();
    assert!(codes.contains(&"WELCOME10"));
    assert!(codes.contains(&"FREESHIP"));
    assert!(!codes.contains(&"SPRING25"));
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_validate_coupon_case_insensitive() {
    let (status, lower) = get_json(&api_url("/coupons/validate/welcome10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lower["code"], "WELCOME10");
    assert_eq!(lower["discount"], 10);

    let (status, upper) = get_json(&api_url("/coupons/validate/WELCOME10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lower, upper);
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_validate_inactive_coupon() {
    let (status, body) = get_json(&api_url("/coupons/validate/spring25")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Coupon is not active");
}

#[tokio::test]
#[ignore = "Requires running API server and seeded database"]
async fn test_validate_unknown_coupon() {
    let (status, body) = get_json(&api_url("/coupons/validate/NOPE")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}
