//! Order repository.
//!
//! Orders are written once and never updated. Items are stored as a JSONB
//! snapshot so later product changes do not alter placed orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use bloom_core::{Coupon, CouponId, NewOrder, Order, OrderId, OrderItem, ShopId};

use super::{RepositoryError, contains_pattern};

const ORDER_SELECT: &str = r#"
    SELECT o.id, o.email, o.phone, o.address, o.items, o.shop_id, o.coupon_id, o.created_at,
           c.code AS coupon_code,
           c.discount AS coupon_discount,
           c.description AS coupon_description,
           c.min_order_amount AS coupon_min_order_amount,
           c.expires_at AS coupon_expires_at,
           c.is_active AS coupon_is_active
    FROM "order" o
    LEFT JOIN coupon c ON c.id = o.coupon_id
"#;

/// Filters for [`OrderRepository::search`]. All present filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSearch {
    /// Case-insensitive substring of the email.
    pub email: Option<String>,
    /// Case-insensitive substring of the phone number.
    pub phone: Option<String>,
    pub order_id: Option<OrderId>,
}

/// Outcome of [`OrderRepository::create`].
#[derive(Debug)]
pub enum CreateOutcome {
    Created(Order),
    /// The requested coupon does not exist or is not active.
    CouponUnavailable,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    email: String,
    phone: String,
    address: String,
    items: Json<Vec<OrderItem>>,
    shop_id: ShopId,
    coupon_id: Option<CouponId>,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, coupon: Option<Coupon>) -> Order {
        Order {
            id: self.id,
            email: self.email,
            phone: self.phone,
            address: self.address,
            items: self.items.0,
            shop_id: self.shop_id,
            coupon_id: self.coupon_id,
            created_at: self.created_at,
            coupon,
        }
    }
}

/// An order row joined with its coupon's columns.
#[derive(Debug, sqlx::FromRow)]
struct OrderRecord {
    #[sqlx(flatten)]
    order: OrderRow,
    coupon_code: Option<String>,
    coupon_discount: Option<i32>,
    coupon_description: Option<String>,
    coupon_min_order_amount: Option<Decimal>,
    coupon_expires_at: Option<DateTime<Utc>>,
    coupon_is_active: Option<bool>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = RepositoryError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let Some(coupon_id) = record.order.coupon_id else {
            return Ok(record.order.into_order(None));
        };

        let (Some(code), Some(discount), Some(description), Some(is_active)) = (
            record.coupon_code,
            record.coupon_discount,
            record.coupon_description,
            record.coupon_is_active,
        ) else {
            return Err(RepositoryError::DataCorruption(format!(
                "order {} references missing coupon {coupon_id}",
                record.order.id
            )));
        };

        let coupon = Coupon {
            id: coupon_id,
            code,
            discount,
            description,
            min_order_amount: record.coupon_min_order_amount,
            expires_at: record.coupon_expires_at,
            is_active,
        };
        Ok(record.order.into_order(Some(coupon)))
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order, linking its coupon if one was requested.
    ///
    /// The coupon row is share-locked for the duration of the insert, so it
    /// cannot be deactivated between the check and the write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Integrity` if the shop does not exist.
    /// Returns `RepositoryError::Database` if a query fails.
    #[tracing::instrument(skip(self, order), fields(shop_id = %order.shop_id))]
    pub async fn create(&self, order: &NewOrder) -> Result<CreateOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let coupon = match &order.coupon_code {
            Some(code) => {
                let coupon = sqlx::query_as::<_, Coupon>(
                    r"
                    SELECT id, code, discount, description, min_order_amount, expires_at, is_active
                    FROM coupon
                    WHERE code = $1
                    FOR SHARE
                    ",
                )
                .bind(code.as_str())
                .fetch_optional(&mut *tx)
                .await?;

                match coupon {
                    Some(coupon) if coupon.is_active => Some(coupon),
                    _ => return Ok(CreateOutcome::CouponUnavailable),
                }
            }
            None => None,
        };

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO "order" (email, phone, address, items, shop_id, coupon_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, phone, address, items, shop_id, coupon_id, created_at
            "#,
        )
        .bind(order.email.as_str())
        .bind(&order.phone)
        .bind(&order.address)
        .bind(Json(&order.items))
        .bind(order.shop_id)
        .bind(coupon.as_ref().map(|c| c.id))
        .fetch_one(&mut *tx)
        .await
        .map_err(RepositoryError::from_write)?;

        tx.commit().await?;

        tracing::info!(order_id = %row.id, "Order created");
        Ok(CreateOutcome::Created(row.into_order(coupon)))
    }

    /// Get an order and its coupon by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the linked coupon is missing.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let sql = format!("{ORDER_SELECT} WHERE o.id = $1");

        sqlx::query_as::<_, OrderRecord>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .map(Order::try_from)
            .transpose()
    }

    /// Find orders matching every present filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a linked coupon is missing.
    #[tracing::instrument(skip(self, search))]
    pub async fn search(&self, search: &OrderSearch) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            r"{ORDER_SELECT}
            WHERE
                ($1::text IS NULL OR o.email ILIKE $1)
                AND ($2::text IS NULL OR o.phone ILIKE $2)
                AND ($3::int IS NULL OR o.id = $3)
            ORDER BY o.created_at DESC, o.id DESC
            "
        );

        sqlx::query_as::<_, OrderRecord>(&sql)
            .bind(search.email.as_deref().map(contains_pattern))
            .bind(search.phone.as_deref().map(contains_pattern))
            .bind(search.order_id)
            .fetch_all(self.pool)
            .await?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }
}
