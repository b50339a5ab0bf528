//! Orders and the checkout request that creates them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::Coupon;
use super::coupon_code::CouponCode;
use super::email::Email;
use super::id::{CouponId, OrderId, ProductId, ShopId};
use super::price::{apply_percentage_discount, line_total};

/// One line of an order, frozen at checkout time.
///
/// The price is a copy, not a reference to the product, so later price
/// changes never alter a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    /// `price × quantity`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        line_total(self.price, self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<OrderItem>,
    pub shop_id: ShopId,
    pub coupon_id: Option<CouponId>,
    pub created_at: DateTime<Utc>,
    /// The coupon linked at creation, if any.
    pub coupon: Option<Coupon>,
}

impl Order {
    /// Sum of the frozen line totals.
    #[must_use]
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(OrderItem::total).sum()
    }

    /// Items total after the linked coupon's discount.
    ///
    /// Uses the stored percentage regardless of whether the coupon has since
    /// been deactivated.
    #[must_use]
    pub fn discounted_total(&self) -> Decimal {
        let total = self.items_total();
        self.coupon
            .as_ref()
            .map_or(total, |c| apply_percentage_discount(total, c.discount))
    }
}

/// Checkout payload as received from the storefront.
///
/// Every field is optional at this level so that missing fields produce a
/// validation message instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default)]
    pub shop_id: Option<ShopId>,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

/// Why a [`CreateOrderRequest`] was rejected before touching storage.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    #[error("All fields (email, phone, address, items, shopId) are required")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Items must be a non-empty array")]
    EmptyItems,
    #[error("Item {index} must have a quantity of at least 1")]
    InvalidQuantity { index: usize },
    #[error("Item {index} must not have a negative price")]
    NegativePrice { index: usize },
}

/// A checkout request that passed validation, with fields normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Trimmed and lowercased.
    pub email: Email,
    /// Trimmed.
    pub phone: String,
    /// Trimmed.
    pub address: String,
    pub items: Vec<OrderItem>,
    pub shop_id: ShopId,
    /// Normalized code, if one was supplied.
    pub coupon_code: Option<CouponCode>,
}

impl CreateOrderRequest {
    /// Check required fields and normalize them.
    ///
    /// A blank coupon code counts as no coupon.
    ///
    /// # Errors
    ///
    /// Returns the first [`OrderValidationError`] found. Missing fields are
    /// reported before format problems.
    pub fn validate(self) -> Result<NewOrder, OrderValidationError> {
        let email = non_blank(self.email.as_deref());
        let phone = non_blank(self.phone.as_deref());
        let address = non_blank(self.address.as_deref());

        let (Some(email), Some(phone), Some(address), Some(items), Some(shop_id)) =
            (email, phone, address, self.items, self.shop_id)
        else {
            return Err(OrderValidationError::MissingFields);
        };

        let email = Email::normalized(email).map_err(|_| OrderValidationError::InvalidEmail)?;

        if items.is_empty() {
            return Err(OrderValidationError::EmptyItems);
        }
        for (index, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(OrderValidationError::InvalidQuantity { index });
            }
            if item.price < Decimal::ZERO {
                return Err(OrderValidationError::NegativePrice { index });
            }
        }

        let coupon_code = self
            .coupon_code
            .as_deref()
            .and_then(|c| CouponCode::parse(c).ok());

        Ok(NewOrder {
            email,
            phone: phone.to_owned(),
            address: address.to_owned(),
            items,
            shop_id,
            coupon_code,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rose(quantity: u32) -> OrderItem {
        OrderItem {
            product_id: ProductId::new(1),
            name: "Rose".to_string(),
            price: Decimal::from(100),
            quantity,
        }
    }

    fn request() -> CreateOrderRequest {
        CreateOrderRequest {
            email: Some("  Buyer@Example.com ".to_string()),
            phone: Some(" +380501234567 ".to_string()),
            address: Some(" 15 Shevchenka St, Kyiv ".to_string()),
            items: Some(vec![rose(2)]),
            shop_id: Some(ShopId::new(1)),
            coupon_code: None,
        }
    }

    #[test]
    fn test_validate_normalizes_fields() {
        let order = request().validate().unwrap();
        assert_eq!(order.email.as_str(), "buyer@example.com");
        assert_eq!(order.phone, "+380501234567");
        assert_eq!(order.address, "15 Shevchenka St, Kyiv");
        assert_eq!(order.items, vec![rose(2)]);
        assert_eq!(order.coupon_code, None);
    }

    #[test]
    fn test_validate_missing_fields() {
        for strip in 0..5 {
            let mut req = request();
            match strip {
                0 => req.email = None,
                1 => req.phone = Some("   ".to_string()),
                2 => req.address = None,
                3 => req.items = None,
                _ => req.shop_id = None,
            }
            assert_eq!(req.validate(), Err(OrderValidationError::MissingFields));
        }
    }

    #[test]
    fn test_validate_bad_email() {
        let req = CreateOrderRequest {
            email: Some("not-an-email".to_string()),
            ..request()
        };
        assert_eq!(req.validate(), Err(OrderValidationError::InvalidEmail));
    }

    #[test]
    fn test_validate_empty_items() {
        let req = CreateOrderRequest {
            items: Some(Vec::new()),
            ..request()
        };
        assert_eq!(req.validate(), Err(OrderValidationError::EmptyItems));
    }

    #[test]
    fn test_validate_item_checks() {
        let req = CreateOrderRequest {
            items: Some(vec![rose(1), rose(0)]),
            ..request()
        };
        assert_eq!(
            req.validate(),
            Err(OrderValidationError::InvalidQuantity { index: 1 })
        );

        let mut negative = rose(1);
        negative.price = Decimal::from(-5);
        let req = CreateOrderRequest {
            items: Some(vec![negative]),
            ..request()
        };
        assert_eq!(
            req.validate(),
            Err(OrderValidationError::NegativePrice { index: 0 })
        );
    }

    #[test]
    fn test_validate_coupon_code() {
        let req = CreateOrderRequest {
            coupon_code: Some(" welcome10 ".to_string()),
            ..request()
        };
        assert_eq!(
            req.validate().unwrap().coupon_code.unwrap().as_str(),
            "WELCOME10"
        );

        let blank = CreateOrderRequest {
            coupon_code: Some("  ".to_string()),
            ..request()
        };
        assert_eq!(blank.validate().unwrap().coupon_code, None);
    }

    #[test]
    fn test_request_from_json() {
        let req: CreateOrderRequest = serde_json::from_value(serde_json::json!({
            "email": "a@b.co",
            "phone": "123",
            "address": "Street 1",
            "items": [{"productId": 1, "name": "Rose", "price": 100, "quantity": 2}],
            "shopId": 1,
            "couponCode": null
        }))
        .unwrap();
        assert_eq!(req.items.unwrap(), vec![rose(2)]);
        assert_eq!(req.coupon_code, None);
    }

    #[test]
    fn test_totals_use_frozen_prices() {
        let coupon = Coupon {
            id: CouponId::new(2),
            code: "FREESHIP".to_string(),
            discount: 5,
            description: "5% off delivery".to_string(),
            min_order_amount: None,
            expires_at: None,
            is_active: false,
        };
        let order = Order {
            id: OrderId::new(1),
            email: "a@b.co".to_string(),
            phone: "123".to_string(),
            address: "Street 1".to_string(),
            items: vec![rose(2), rose(1)],
            shop_id: ShopId::new(1),
            coupon_id: Some(coupon.id),
            created_at: Utc::now(),
            coupon: Some(coupon),
        };
        assert_eq!(order.items_total(), Decimal::from(300));
        // Deactivated afterwards, still discounted.
        assert_eq!(order.discounted_total(), Decimal::from(285));
    }
}
