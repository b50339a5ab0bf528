//! Coupon repository.

use sqlx::PgPool;

use bloom_core::{Coupon, CouponCode};

use super::RepositoryError;

/// Repository for coupon database operations.
pub struct CouponRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CouponRepository<'a> {
    /// Create a new coupon repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active coupons, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<Coupon>, RepositoryError> {
        let coupons = sqlx::query_as::<_, Coupon>(
            r"
            SELECT id, code, discount, description, min_order_amount, expires_at, is_active
            FROM coupon
            WHERE is_active
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(coupons)
    }

    /// Look up a coupon by its normalized code, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self, code), fields(code = %code))]
    pub async fn find_by_code(&self, code: &CouponCode) -> Result<Option<Coupon>, RepositoryError> {
        let coupon = sqlx::query_as::<_, Coupon>(
            r"
            SELECT id, code, discount, description, min_order_amount, expires_at, is_active
            FROM coupon
            WHERE code = $1
            ",
        )
        .bind(code.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(coupon)
    }
}
