//! Core types for Bloom.
//!
//! This module provides type-safe wrappers for common domain concepts and the
//! records exchanged between the storefront and the API.

pub mod catalog;
pub mod coupon_code;
pub mod email;
pub mod id;
pub mod order;
pub mod pagination;
pub mod price;
pub mod sort;

pub use catalog::{Coupon, Product, Shop};
pub use coupon_code::{CouponCode, CouponCodeError};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{CreateOrderRequest, NewOrder, Order, OrderItem, OrderValidationError};
pub use pagination::{Page, PageRequest, PaginationError};
pub use price::{apply_percentage_discount, line_total};
pub use sort::{ProductSort, SortOrder, SortParseError};
