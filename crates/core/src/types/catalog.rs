//! Catalog records: shops, products and coupons.
//!
//! These are the shapes served by the API and held by the cart. Field names
//! serialize in camelCase; prices serialize as JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CouponId, ProductId, ShopId};

/// A physical storefront selling products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// A purchasable item belonging to one shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// The only field that changes after creation.
    pub is_favorite: bool,
    pub shop_id: ShopId,
    pub created_at: DateTime<Utc>,
}

/// A percentage-discount code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: CouponId,
    /// Stored in canonical uppercase form.
    pub code: String,
    /// Discount percentage, 0 to 100.
    pub discount: i32,
    pub description: String,
    /// Cart total required before the coupon may be applied.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_order_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl Coupon {
    /// Whether `total` satisfies this coupon's minimum order amount.
    ///
    /// Coupons without a minimum accept any total.
    #[must_use]
    pub fn accepts_total(&self, total: Decimal) -> bool {
        self.min_order_amount.is_none_or(|min| total >= min)
    }
}
