//! Catalog service error types.

use thiserror::Error;

use bloom_core::{CouponCodeError, PaginationError, SortParseError};

use crate::db::RepositoryError;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Unknown `sortBy` or `sortOrder` value.
    #[error(transparent)]
    InvalidSort(#[from] SortParseError),

    /// Malformed `page` or `limit` value.
    #[error(transparent)]
    InvalidPagination(#[from] PaginationError),

    /// Blank coupon code.
    #[error(transparent)]
    InvalidCouponCode(#[from] CouponCodeError),

    #[error("Coupon not found")]
    CouponNotFound,

    #[error("Coupon is not active")]
    CouponInactive,

    #[error("Product not found")]
    ProductNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
