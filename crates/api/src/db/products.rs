//! Product repository.
//!
//! Listing order is assembled from [`ProductSort`] and [`SortOrder`] only, so
//! the `ORDER BY` fragment never contains request text.

use sqlx::PgPool;

use bloom_core::{Page, PageRequest, Product, ProductId, ProductSort, ShopId, SortOrder};

use super::RepositoryError;

const PRODUCT_COLUMNS: &str = "id, name, price, image_url, is_favorite, shop_id, created_at";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product of a shop.
    ///
    /// An unknown shop yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_by_shop(
        &self,
        shop_id: ShopId,
        sort: ProductSort,
        order: SortOrder,
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE shop_id = $1 ORDER BY {}",
            listing_order(sort, order)
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(shop_id)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// List one page of a shop's products, favorites first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    #[tracing::instrument(skip(self))]
    pub async fn list_page_by_shop(
        &self,
        shop_id: ShopId,
        sort: ProductSort,
        order: SortOrder,
        request: PageRequest,
    ) -> Result<Page<Product>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE shop_id = $1 \
             ORDER BY {} LIMIT $2 OFFSET $3",
            paginated_order(sort, order)
        );

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product WHERE shop_id = $1")
            .bind(shop_id)
            .fetch_one(self.pool);
        let rows = sqlx::query_as::<_, Product>(&sql)
            .bind(shop_id)
            .bind(i64::from(request.limit()))
            .bind(request.offset())
            .fetch_all(self.pool);

        let (total_count, products) = tokio::try_join!(count, rows)?;

        Ok(Page::new(products, total_count, request))
    }

    /// Set a product's favorite flag and return the updated product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` if the query fails.
    #[tracing::instrument(skip(self))]
    pub async fn set_favorite(
        &self,
        id: ProductId,
        is_favorite: bool,
    ) -> Result<Product, RepositoryError> {
        let sql = format!(
            "UPDATE product SET is_favorite = $2 WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(is_favorite)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }
}

/// `ORDER BY` for an unpaginated listing.
///
/// `Favorite` and `Default` ignore the requested direction. Ties fall back to
/// id so equal keys list in a stable order.
fn listing_order(sort: ProductSort, order: SortOrder) -> String {
    match sort {
        ProductSort::Price => format!("price {}, id ASC", order.as_sql()),
        ProductSort::Date => format!("created_at {}, id ASC", order.as_sql()),
        ProductSort::Favorite => "is_favorite DESC, created_at DESC, id ASC".to_owned(),
        ProductSort::Default => "created_at DESC, id ASC".to_owned(),
    }
}

/// `ORDER BY` for a paginated listing: favorites always lead, and an
/// unspecified sort means creation time in the requested direction.
fn paginated_order(sort: ProductSort, order: SortOrder) -> String {
    match sort {
        ProductSort::Favorite => listing_order(sort, order),
        ProductSort::Default => paginated_order(ProductSort::Date, order),
        ProductSort::Price | ProductSort::Date => {
            format!("is_favorite DESC, {}", listing_order(sort, order))
        }
    }
}
