//! Order service error types.

use thiserror::Error;

use bloom_core::OrderValidationError;

use crate::db::RepositoryError;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The checkout request failed validation.
    #[error(transparent)]
    Validation(#[from] OrderValidationError),

    /// The requested coupon does not exist or is not active.
    #[error("Invalid or inactive coupon")]
    InvalidCoupon,

    /// A search was requested with no filters.
    #[error("At least one search parameter is required")]
    MissingSearchCriteria,

    /// The `orderId` search filter is not an integer.
    #[error("Invalid orderId format")]
    InvalidOrderId,

    /// No order has the requested id.
    #[error("Order not found")]
    NotFound,

    /// A search matched nothing.
    #[error("No orders found")]
    NoMatches,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
