//! Shop repository.

use sqlx::PgPool;

use bloom_core::Shop;

use super::RepositoryError;

/// Repository for shop database operations.
pub struct ShopRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShopRepository<'a> {
    /// Create a new shop repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every shop, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Shop>, RepositoryError> {
        let shops = sqlx::query_as::<_, Shop>(
            r"
            SELECT id, name, address, created_at
            FROM shop
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(shops)
    }
}
