//! Business logic services for the API.
//!
//! # Services
//!
//! - `catalog` - Shops, product listings, favorites and coupon validation
//! - `orders` - Checkout, order lookup and order search
//!
//! Services parse and validate request values before touching the database,
//! so malformed input never costs a query.

pub mod catalog;
pub mod orders;

pub use catalog::{CatalogError, CatalogService, SortParams};
pub use orders::{OrderError, OrderService};
