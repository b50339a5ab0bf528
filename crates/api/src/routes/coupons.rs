//! Coupon route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use bloom_core::Coupon;

use crate::error::Result;
use crate::services::CatalogService;
use crate::state::AppState;

/// `GET /api/coupons`
#[tracing::instrument(skip(state))]
pub async fn list_coupons(State(state): State<AppState>) -> Result<Json<Vec<Coupon>>> {
    let coupons = CatalogService::new(state.pool())
        .list_active_coupons()
        .await?;
    Ok(Json(coupons))
}

/// `GET /api/coupons/validate/{code}`
#[tracing::instrument(skip(state))]
pub async fn validate_coupon(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Coupon>> {
    let coupon = CatalogService::new(state.pool())
        .validate_coupon(&code)
        .await?;
    Ok(Json(coupon))
}
