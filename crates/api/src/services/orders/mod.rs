//! Order service.
//!
//! Turns checkout requests into stored orders and answers order lookups.
//! The coupon minimum order amount is enforced by the cart, not here: a
//! request carrying an active coupon is accepted whatever its total.

mod error;

pub use error::OrderError;

use sqlx::PgPool;

use bloom_core::{CreateOrderRequest, Order, OrderId};

use crate::db::orders::{CreateOutcome, OrderRepository, OrderSearch};

/// Order service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Validate a checkout request and store the order.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Validation` if a field is missing or malformed.
    /// Returns `OrderError::InvalidCoupon` if the coupon is unknown or inactive.
    /// Returns `OrderError::Repository` if the shop does not exist or the
    /// insert fails.
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, OrderError> {
        let new_order = request.validate()?;

        match self.orders.create(&new_order).await? {
            CreateOutcome::Created(order) => Ok(order),
            CreateOutcome::CouponUnavailable => {
                tracing::debug!(
                    coupon = ?new_order.coupon_code.as_ref().map(bloom_core::CouponCode::as_str),
                    "Order rejected: coupon unavailable"
                );
                Err(OrderError::InvalidCoupon)
            }
        }
    }

    /// Get an order by id.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::NotFound` if no such order exists.
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders.get(id).await?.ok_or(OrderError::NotFound)
    }

    /// Search orders by raw query values.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::MissingSearchCriteria` if every filter is blank.
    /// Returns `OrderError::InvalidOrderId` if `order_id` is not an integer.
    /// Returns `OrderError::NoMatches` if nothing matches.
    pub async fn search_orders(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
        order_id: Option<&str>,
    ) -> Result<Vec<Order>, OrderError> {
        let search = parse_search(email, phone, order_id)?;
        let orders = self.orders.search(&search).await?;

        if orders.is_empty() {
            return Err(OrderError::NoMatches);
        }
        Ok(orders)
    }
}

/// Build search filters from raw query values.
///
/// Blank values count as absent. Emails are lowercased since they are stored
/// lowercased.
fn parse_search(
    email: Option<&str>,
    phone: Option<&str>,
    order_id: Option<&str>,
) -> Result<OrderSearch, OrderError> {
    let email = non_blank(email).map(str::to_lowercase);
    let phone = non_blank(phone).map(str::to_owned);
    let order_id = non_blank(order_id);

    if email.is_none() && phone.is_none() && order_id.is_none() {
        return Err(OrderError::MissingSearchCriteria);
    }

    let order_id = order_id
        .map(str::parse::<OrderId>)
        .transpose()
        .map_err(|_| OrderError::InvalidOrderId)?;

    Ok(OrderSearch {
        email,
        phone,
        order_id,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_requires_a_filter() {
        assert!(matches!(
            parse_search(None, None, None),
            Err(OrderError::MissingSearchCriteria)
        ));
        assert!(matches!(
            parse_search(Some("  "), Some(""), None),
            Err(OrderError::MissingSearchCriteria)
        ));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(" \t ")), None);
        assert_eq!(non_blank(Some("  050 ")), Some("050"));
    }

    #[test]
    fn test_parse_search_normalizes() {
        let search = parse_search(Some(" Buyer@Example.COM "), Some(" 050 "), None).unwrap();
        assert_eq!(search.email.as_deref(), Some("buyer@example.com"));
        assert_eq!(search.phone.as_deref(), Some("050"));
        assert_eq!(search.order_id, None);
    }

    #[test]
    fn test_parse_search_order_id() {
        let search = parse_search(None, None, Some("42")).unwrap();
        assert_eq!(search.order_id, Some(OrderId::new(42)));

        assert!(matches!(
            parse_search(None, None, Some("abc")),
            Err(OrderError::InvalidOrderId)
        ));
        // Format is checked even when other filters are present.
        assert!(matches!(
            parse_search(Some("buyer"), None, Some("4.2")),
            Err(OrderError::InvalidOrderId)
        ));
    }
}
