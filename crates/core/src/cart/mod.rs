//! Shopper cart: selected products, quantities and an applied coupon.
//!
//! [`Cart`] is an explicit state container. It owns a [`CartStorage`] backend
//! and writes its state there after every mutation; state is read back once,
//! in [`Cart::load`]. Stored data that no longer parses is discarded and the
//! cart starts empty.
//!
//! ```
//! use bloom_core::cart::{Cart, MemoryStorage};
//!
//! let cart = Cart::load(MemoryStorage::new());
//! assert_eq!(cart.total_items(), 0);
//! ```

mod storage;

pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::{
    Coupon, CouponCode, CreateOrderRequest, OrderItem, Product, ProductId, ShopId,
    apply_percentage_discount, line_total,
};

/// Storage key for the cart items.
pub const CART_STORAGE_KEY: &str = "shopping_cart";
/// Storage key for the applied coupon.
pub const COUPON_STORAGE_KEY: &str = "applied_coupon";

/// A product in the cart and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Snapshot of the product taken when it was added.
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// `product.price × quantity`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        line_total(self.product.price, self.quantity)
    }
}

/// Why a coupon could not be applied. Messages are shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponRejection {
    #[error("Coupon code is required")]
    Blank,
    #[error("Coupon {code} does not exist")]
    Unknown { code: String },
    #[error("Coupon {code} is no longer active")]
    Inactive { code: String },
    #[error("Minimum order for coupon {code} is {minimum}")]
    BelowMinimum { code: String, minimum: Decimal },
}

/// Errors returned by cart operations.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The coupon was rejected; the cart is unchanged.
    #[error(transparent)]
    Coupon(#[from] CouponRejection),
    /// The in-memory change was made but could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The shopper's pending selection.
#[derive(Debug)]
pub struct Cart<S: CartStorage> {
    items: Vec<CartItem>,
    applied_coupon: Option<Coupon>,
    storage: S,
}

impl<S: CartStorage> Cart<S> {
    /// Restore a cart from `storage`.
    ///
    /// Missing keys give an empty cart. Unreadable or corrupt values are
    /// logged, removed from storage and treated as empty.
    pub fn load(mut storage: S) -> Self {
        let items: Vec<CartItem> = load_key(&mut storage, CART_STORAGE_KEY).unwrap_or_default();
        let applied_coupon: Option<Coupon> = load_key(&mut storage, COUPON_STORAGE_KEY);

        tracing::debug!(
            items = items.len(),
            coupon = applied_coupon.as_ref().map(|c| c.code.as_str()),
            "cart loaded"
        );

        Self {
            items,
            applied_coupon,
            storage,
        }
    }

    /// Items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The applied coupon, if any.
    #[must_use]
    pub const fn applied_coupon(&self) -> Option<&Coupon> {
        self.applied_coupon.as_ref()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the cart and return its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Add one unit of `product`.
    ///
    /// A product already in the cart has its quantity incremented; otherwise
    /// it is appended with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the new state cannot be persisted.
    pub fn add_to_cart(&mut self, product: Product) -> Result<(), CartError> {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(CartItem {
                product,
                quantity: 1,
            });
        }
        self.persist()
    }

    /// Remove a product entirely. No-op if it is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the new state cannot be persisted.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Result<(), CartError> {
        self.items.retain(|i| i.product.id != product_id);
        self.persist()
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Zero or a negative quantity removes the item. Products not in the cart
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the new state cannot be persisted.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CartError> {
        if quantity <= 0 {
            self.items.retain(|i| i.product.id != product_id);
        } else if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        self.persist()
    }

    /// Remove every item and the applied coupon.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the new state cannot be persisted.
    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        self.items.clear();
        self.applied_coupon = None;
        self.persist()
    }

    /// Sum of `price × quantity` over all items, unrounded.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::total).sum()
    }

    /// Sum of quantities, for the cart badge.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Apply the coupon matching `code` from `known`.
    ///
    /// Codes are compared case-insensitively after trimming. The coupon must
    /// be active and the current total must reach its minimum order amount.
    /// On rejection any previously applied coupon stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Coupon`] with the reason for rejection, or
    /// [`CartError::Storage`] if the new state cannot be persisted.
    pub fn apply_coupon(&mut self, code: &str, known: &[Coupon]) -> Result<(), CartError> {
        let code = CouponCode::parse(code).map_err(|_| CouponRejection::Blank)?;

        let coupon = known
            .iter()
            .find(|c| code.matches(&c.code))
            .ok_or_else(|| CouponRejection::Unknown {
                code: code.to_string(),
            })?;

        if !coupon.is_active {
            return Err(CouponRejection::Inactive {
                code: coupon.code.clone(),
            }
            .into());
        }

        if !coupon.accepts_total(self.total_price()) {
            return Err(CouponRejection::BelowMinimum {
                code: coupon.code.clone(),
                minimum: coupon.min_order_amount.unwrap_or_default(),
            }
            .into());
        }

        tracing::debug!(code = %coupon.code, discount = coupon.discount, "coupon applied");
        self.applied_coupon = Some(coupon.clone());
        self.persist()
    }

    /// Drop the applied coupon, keeping the items.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the new state cannot be persisted.
    pub fn remove_coupon(&mut self) -> Result<(), CartError> {
        self.applied_coupon = None;
        self.persist()
    }

    /// Total after the applied coupon's discount.
    ///
    /// Equal to [`Cart::total_price`] when no coupon is applied or the applied
    /// coupon is inactive.
    #[must_use]
    pub fn discounted_total_price(&self) -> Decimal {
        let total = self.total_price();
        match &self.applied_coupon {
            Some(coupon) if coupon.is_active => apply_percentage_discount(total, coupon.discount),
            _ => total,
        }
    }

    /// Frozen order lines for checkout.
    #[must_use]
    pub fn order_items(&self) -> Vec<OrderItem> {
        self.items
            .iter()
            .map(|i| OrderItem {
                product_id: i.product.id,
                name: i.product.name.clone(),
                price: i.product.price,
                quantity: i.quantity,
            })
            .collect()
    }

    /// Build the checkout payload for this cart.
    #[must_use]
    pub fn checkout_request(
        &self,
        email: &str,
        phone: &str,
        address: &str,
        shop_id: ShopId,
    ) -> CreateOrderRequest {
        CreateOrderRequest {
            email: Some(email.to_owned()),
            phone: Some(phone.to_owned()),
            address: Some(address.to_owned()),
            items: Some(self.order_items()),
            shop_id: Some(shop_id),
            coupon_code: self.applied_coupon.as_ref().map(|c| c.code.clone()),
        }
    }

    fn persist(&mut self) -> Result<(), CartError> {
        if self.items.is_empty() {
            self.storage.remove(CART_STORAGE_KEY)?;
        } else {
            let json = serde_json::to_string(&self.items).map_err(StorageError::from)?;
            self.storage.write(CART_STORAGE_KEY, &json)?;
        }

        match &self.applied_coupon {
            Some(coupon) => {
                let json = serde_json::to_string(coupon).map_err(StorageError::from)?;
                self.storage.write(COUPON_STORAGE_KEY, &json)?;
            }
            None => self.storage.remove(COUPON_STORAGE_KEY)?,
        }
        Ok(())
    }
}

/// Read and decode `key`, discarding anything that fails.
fn load_key<S: CartStorage, T: DeserializeOwned>(storage: &mut S, key: &str) -> Option<T> {
    let raw = match storage.read(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored cart state, starting empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding corrupt cart state");
            if let Err(e) = storage.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove corrupt cart state");
            }
            None
        }
    }
}
