//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! Error bodies are JSON: `{"error": "...", "details": "..."}`. `details` is
//! only present for server errors while [`expose_error_details`] is enabled,
//! which `main` does in the development environment.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{CatalogError, OrderError};

static EXPOSE_DETAILS: AtomicBool = AtomicBool::new(false);

/// Include server error details in response bodies.
pub fn expose_error_details(enabled: bool) {
    EXPOSE_DETAILS.store(enabled, Ordering::Relaxed);
}

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Malformed request from client.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// Status code and client-facing message.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Catalog(CatalogError::Repository(err))
            | Self::Order(OrderError::Repository(err)) => repository_status(err),
            Self::Catalog(err) => {
                let status = match err {
                    CatalogError::CouponNotFound | CatalogError::ProductNotFound => {
                        StatusCode::NOT_FOUND
                    }
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, err.to_string())
            }
            Self::Order(err) => {
                let status = match err {
                    OrderError::NotFound | OrderError::NoMatches => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, err.to_string())
            }
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        }
    }
}

/// Map repository failures the way the storefront expects them.
fn repository_status(err: &RepositoryError) -> (StatusCode, String) {
    match err {
        RepositoryError::NotFound => (StatusCode::NOT_FOUND, "Record not found".to_string()),
        RepositoryError::Conflict(_) => (StatusCode::CONFLICT, "Duplicate entry".to_string()),
        RepositoryError::Integrity(_) => (
            StatusCode::BAD_REQUEST,
            "Foreign key constraint failed".to_string(),
        ),
        RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database error".to_string(),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        // Don't expose internal error details to clients outside development
        let details = (status.is_server_error() && EXPOSE_DETAILS.load(Ordering::Relaxed))
            .then(|| self.to_string());

        (
            status,
            Json(ErrorBody {
                error: message,
                details,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bloom_core::{OrderValidationError, SortParseError};

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn get_body(err: AppError) -> serde_json::Value {
        let body = axum::body::to_bytes(err.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_validation_error() {
        let err = AppError::Validation("invalid input".to_string());
        assert_eq!(err.to_string(), "Validation error: invalid input");
        assert_eq!(get_status(err), StatusCode::BAD_REQUEST);
    }

    fn repository(err: RepositoryError) -> AppError {
        OrderError::Repository(err).into()
    }

    #[test]
    fn test_repository_error_status_codes() {
        assert_eq!(
            get_status(repository(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(repository(RepositoryError::Conflict(
                "coupon_code_key".to_string()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(repository(RepositoryError::Integrity(
                "order_shop_id_fkey".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(repository(RepositoryError::DataCorruption(
                "bad".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(CatalogError::Repository(RepositoryError::NotFound).into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_service_error_status_codes() {
        assert_eq!(
            get_status(OrderError::InvalidCoupon.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(OrderError::NoMatches.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(CatalogError::CouponNotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(CatalogError::CouponInactive.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(CatalogError::ProductNotFound.into()),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_error_body() {
        let body =
            get_body(OrderError::Validation(OrderValidationError::InvalidEmail).into()).await;
        assert_eq!(body, serde_json::json!({"error": "Invalid email format"}));

        let err = CatalogError::InvalidSort(SortParseError {
            param: "sortBy",
            value: "name".to_string(),
            expected: "price, date, createdAt, favorite",
        });
        let body = get_body(err.into()).await;
        assert_eq!(
            body["error"],
            "invalid sortBy 'name', expected one of: price, date, createdAt, favorite"
        );
    }

    #[tokio::test]
    async fn test_server_error_hides_details() {
        let body = get_body(repository(RepositoryError::DataCorruption(
            "secret row".to_string(),
        )))
        .await;
        assert_eq!(body, serde_json::json!({"error": "Database error"}));
    }
}
