//! Product route handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::Deserialize;

use bloom_core::{Page, Product, ProductId, ShopId};

use super::parse_id;
use crate::error::{AppError, Result};
use crate::services::{CatalogService, SortParams};
use crate::state::AppState;

/// Sort query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Pagination and sort query parameters.
///
/// Kept as strings so malformed numbers produce our own message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// `GET /api/shops/{id}/products`
#[tracing::instrument(skip(state))]
pub async fn list_by_shop(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>> {
    let shop_id: ShopId = parse_id(&id, "shop")?;
    let Query(query) = query?;
    let params = SortParams {
        sort_by: query.sort_by.as_deref(),
        sort_order: query.sort_order.as_deref(),
    };

    let products = CatalogService::new(state.pool())
        .list_products(shop_id, params)
        .await?;
    Ok(Json(products))
}

/// `GET /api/shops/{id}/products/paginated`
#[tracing::instrument(skip(state))]
pub async fn list_page_by_shop(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: std::result::Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<Product>>> {
    let shop_id: ShopId = parse_id(&id, "shop")?;
    let Query(query) = query?;
    let params = SortParams {
        sort_by: query.sort_by.as_deref(),
        sort_order: query.sort_order.as_deref(),
    };

    let page = CatalogService::new(state.pool())
        .list_products_page(shop_id, query.page.as_deref(), query.limit.as_deref(), params)
        .await?;
    Ok(Json(page))
}

/// `PATCH /api/products/{id}/favorite` with `{"isFavorite": bool}`
#[tracing::instrument(skip(state, payload))]
pub async fn set_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<Product>> {
    let product_id: ProductId = parse_id(&id, "product")?;
    let Json(body) = payload?;
    let is_favorite = body
        .get("isFavorite")
        .and_then(serde_json::Value::as_bool)
        .ok_or_else(|| AppError::Validation("isFavorite must be a boolean".to_string()))?;

    let product = CatalogService::new(state.pool())
        .set_favorite(product_id, is_favorite)
        .await?;
    Ok(Json(product))
}
