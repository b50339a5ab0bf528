//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET   /                                   - Service banner
//! GET   /health                             - Liveness check
//! GET   /health/ready                       - Readiness check (database ping)
//!
//! # Catalog
//! GET   /api/shops                          - All shops
//! GET   /api/shops/{id}/products            - Products of a shop (?sortBy&sortOrder)
//! GET   /api/shops/{id}/products/paginated  - One page of products (?page&limit&sortBy&sortOrder)
//! PATCH /api/products/{id}/favorite         - Set the favorite flag
//!
//! # Coupons
//! GET   /api/coupons                        - Active coupons
//! GET   /api/coupons/validate/{code}        - Validate a code (case-insensitive)
//!
//! # Orders
//! POST  /api/orders                         - Place an order
//! GET   /api/orders/search                  - Search (?email&phone&orderId)
//! GET   /api/orders/{id}                    - Order with its coupon
//! ```
//!
//! Anything else gets a JSON 404.

pub mod coupons;
pub mod orders;
pub mod products;
pub mod shops;

use axum::{
    Json, Router,
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::{Method, Request, StatusCode, Uri},
    middleware::from_fn,
    routing::{get, patch, post},
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::error::AppError;
use crate::middleware::{cors_layer, request_id_middleware};
use crate::state::AppState;

/// Largest accepted request body.
const BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Create the `/api` router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shops", get(shops::list_shops))
        .route("/shops/{id}/products", get(products::list_by_shop))
        .route(
            "/shops/{id}/products/paginated",
            get(products::list_page_by_shop),
        )
        .route("/products/{id}/favorite", patch(products::set_favorite))
        .route("/coupons", get(coupons::list_coupons))
        .route("/coupons/validate/{code}", get(coupons::validate_coupon))
        .route("/orders", post(orders::create_order))
        .route("/orders/search", get(orders::search_orders))
        .route("/orders/{id}", get(orders::get_order))
}

/// Build the full application: operational routes, `/api`, fallback and
/// middleware. Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config().cors_origins);

    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", api_routes())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .layer(cors)
        .with_state(state)
}

/// Request span with an empty `request_id` slot for the middleware to fill.
fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}

/// Parse a numeric path id.
///
/// # Errors
///
/// Returns `AppError::Validation` ("Invalid {entity} ID") if `raw` is not an
/// integer.
pub fn parse_id<T: From<i32>>(raw: &str, entity: &str) -> Result<T, AppError> {
    raw.trim()
        .parse::<i32>()
        .map(T::from)
        .map_err(|_| AppError::Validation(format!("Invalid {entity} ID")))
}

/// Service banner.
async fn banner() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Flower delivery API is running!",
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
    }))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// JSON 404 for unmatched routes.
async fn not_found(method: Method, uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": uri.path(),
            "method": method.as_str(),
        })),
    )
}
