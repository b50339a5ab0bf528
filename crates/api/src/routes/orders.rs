//! Order route handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;

use bloom_core::{CreateOrderRequest, Order, OrderId};

use super::parse_id;
use crate::error::Result;
use crate::services::OrderService;
use crate::state::AppState;

/// Order search query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub order_id: Option<String>,
}

/// `POST /api/orders`
#[tracing::instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>)> {
    let Json(request) = payload?;
    let order = OrderService::new(state.pool()).create_order(request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders/search?email&phone&orderId`
#[tracing::instrument(skip(state, query))]
pub async fn search_orders(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Order>>> {
    let Query(query) = query?;
    let orders = OrderService::new(state.pool())
        .search_orders(
            query.email.as_deref(),
            query.phone.as_deref(),
            query.order_id.as_deref(),
        )
        .await?;
    Ok(Json(orders))
}

/// `GET /api/orders/{id}`
#[tracing::instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let order_id: OrderId = parse_id(&id, "order")?;
    let order = OrderService::new(state.pool()).get_order(order_id).await?;
    Ok(Json(order))
}
