//! Bloom Core - Shared domain types and the cart engine.
//!
//! This crate provides the types shared by every Bloom component:
//! - `api` - REST backend for shops, products, coupons and orders
//! - `cli` - Command-line tools for migrations and seeding
//! - storefront clients embedding the [`cart`] engine
//!
//! # Architecture
//!
//! The core crate contains types, validation and the client-side cart state
//! container. It has no HTTP and no database access; the optional `postgres`
//! feature only adds sqlx encode/decode implementations for the newtypes.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, emails, coupon codes, prices, sorting, pagination
//!   and the catalog/order records
//! - [`cart`] - Shopper cart with coupon application and durable storage

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use types::*;
