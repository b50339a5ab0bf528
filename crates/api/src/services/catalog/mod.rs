//! Catalog service.
//!
//! Read access to shops, products and coupons, plus the favorite toggle.

mod error;

pub use error::CatalogError;

use sqlx::PgPool;

use bloom_core::{
    Coupon, CouponCode, Page, PageRequest, Product, ProductId, ProductSort, Shop, ShopId,
    SortOrder,
};

use crate::db::{CouponRepository, ProductRepository, RepositoryError, ShopRepository};

/// Raw sort query values, as received.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortParams<'q> {
    pub sort_by: Option<&'q str>,
    pub sort_order: Option<&'q str>,
}

impl SortParams<'_> {
    fn parse(self, default_order: SortOrder) -> Result<(ProductSort, SortOrder), CatalogError> {
        let sort = ProductSort::parse_param(self.sort_by)?;
        let order = SortOrder::parse_param(self.sort_order, default_order)?;
        Ok((sort, order))
    }
}

/// Catalog service.
pub struct CatalogService<'a> {
    shops: ShopRepository<'a>,
    products: ProductRepository<'a>,
    coupons: CouponRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            shops: ShopRepository::new(pool),
            products: ProductRepository::new(pool),
            coupons: CouponRepository::new(pool),
        }
    }

    /// List every shop.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the query fails.
    pub async fn list_shops(&self) -> Result<Vec<Shop>, CatalogError> {
        Ok(self.shops.list().await?)
    }

    /// List a shop's products. Direction defaults to ascending.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidSort` for unknown sort values.
    pub async fn list_products(
        &self,
        shop_id: ShopId,
        params: SortParams<'_>,
    ) -> Result<Vec<Product>, CatalogError> {
        let (sort, order) = params.parse(SortOrder::Asc)?;
        Ok(self.products.list_by_shop(shop_id, sort, order).await?)
    }

    /// List one page of a shop's products. Direction defaults to descending.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidSort` or `CatalogError::InvalidPagination`
    /// for malformed query values.
    pub async fn list_products_page(
        &self,
        shop_id: ShopId,
        page: Option<&str>,
        limit: Option<&str>,
        params: SortParams<'_>,
    ) -> Result<Page<Product>, CatalogError> {
        let request = PageRequest::parse(page, limit)?;
        let (sort, order) = params.parse(SortOrder::Desc)?;
        Ok(self
            .products
            .list_page_by_shop(shop_id, sort, order, request)
            .await?)
    }

    /// Mark or unmark a product as favorite.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if the product does not exist.
    pub async fn set_favorite(
        &self,
        product_id: ProductId,
        is_favorite: bool,
    ) -> Result<Product, CatalogError> {
        match self.products.set_favorite(product_id, is_favorite).await {
            Ok(product) => Ok(product),
            Err(RepositoryError::NotFound) => Err(CatalogError::ProductNotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// List active coupons.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the query fails.
    pub async fn list_active_coupons(&self) -> Result<Vec<Coupon>, CatalogError> {
        Ok(self.coupons.list_active().await?)
    }

    /// Look up a coupon by code, case-insensitively, and require it be active.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidCouponCode` for a blank code,
    /// `CatalogError::CouponNotFound` for an unknown one and
    /// `CatalogError::CouponInactive` for a deactivated one.
    pub async fn validate_coupon(&self, code: &str) -> Result<Coupon, CatalogError> {
        let code = CouponCode::parse(code)?;
        let coupon = self
            .coupons
            .find_by_code(&code)
            .await?
            .ok_or(CatalogError::CouponNotFound)?;

        if !coupon.is_active {
            return Err(CatalogError::CouponInactive);
        }
        Ok(coupon)
    }
}
