//! Shop route handlers.

use axum::{Json, extract::State};

use bloom_core::Shop;

use crate::error::Result;
use crate::services::CatalogService;
use crate::state::AppState;

/// `GET /api/shops`
#[tracing::instrument(skip(state))]
pub async fn list_shops(State(state): State<AppState>) -> Result<Json<Vec<Shop>>> {
    let shops = CatalogService::new(state.pool()).list_shops().await?;
    Ok(Json(shops))
}
