//! Seed the database with a shop catalog.
//!
//! Reads shops, their products and coupons from YAML and inserts them in one
//! transaction. Without `--file` the built-in demo catalog
//! (`crates/cli/seed/catalog.yaml`) is used.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use bloom_core::{CouponCode, ShopId};

/// The demo catalog: three shops with twelve products each, two active
/// coupons and one inactive one.
pub const DEMO_CATALOG: &str = include_str!("../../seed/catalog.yaml");

/// A catalog file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedCatalog {
    pub shops: Vec<SeedShop>,
    #[serde(default)]
    pub coupons: Vec<SeedCoupon>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedShop {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedProduct {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedCoupon {
    pub code: String,
    pub discount: i32,
    pub description: String,
    #[serde(default)]
    pub min_order_amount: Option<Decimal>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl SeedCatalog {
    /// Check the catalog and return every problem found.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for shop in &self.shops {
            if shop.name.trim().is_empty() {
                errors.push("shop with empty name".to_string());
            }
            for product in &shop.products {
                if product.name.trim().is_empty() {
                    errors.push(format!("{}: product with empty name", shop.name));
                }
                if product.price < Decimal::ZERO {
                    errors.push(format!("{}: negative price", product.name));
                }
            }
        }

        let mut codes = HashSet::new();
        for coupon in &self.coupons {
            match CouponCode::parse(&coupon.code) {
                Ok(code) => {
                    if !codes.insert(code.clone()) {
                        errors.push(format!("duplicate coupon code {code}"));
                    }
                }
                Err(e) => errors.push(format!("coupon: {e}")),
            }
            if !(0..=100).contains(&coupon.discount) {
                errors.push(format!(
                    "{}: discount {} outside 0-100",
                    coupon.code, coupon.discount
                ));
            }
        }

        errors
    }

    fn product_count(&self) -> usize {
        self.shops.iter().map(|s| s.products.len()).sum()
    }
}

/// Seed the database.
///
/// # Arguments
///
/// * `file` - YAML catalog to load; the demo catalog when `None`
/// * `reset` - Delete existing orders, products, coupons and shops first
///
/// # Errors
///
/// Returns an error if the catalog is invalid, the database already holds
/// shops and `reset` is false, or a database operation fails.
pub async fn run(file: Option<&Path>, reset: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Read and validate before connecting to the database
    let content = match file {
        Some(path) => {
            info!(path = %path.display(), "Loading catalog from file");
            tokio::fs::read_to_string(path).await?
        }
        None => {
            info!("Loading demo catalog");
            DEMO_CATALOG.to_owned()
        }
    };
    let catalog: SeedCatalog = serde_yaml::from_str(&content)?;

    let errors = catalog.validate();
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let pool = super::connect().await?;
    let mut tx = pool.begin().await?;

    if reset {
        sqlx::query(r#"TRUNCATE "order", product, coupon, shop RESTART IDENTITY CASCADE"#)
            .execute(&mut *tx)
            .await?;
        info!("Existing data removed");
    } else {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shop")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            return Err("database already contains shops; pass --reset to replace them".into());
        }
    }

    // Stagger creation times so listed order is also age order
    let started = Utc::now();

    for shop in &catalog.shops {
        let shop_id: ShopId = sqlx::query_scalar(
            "INSERT INTO shop (name, address, created_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&shop.name)
        .bind(&shop.address)
        .bind(started)
        .fetch_one(&mut *tx)
        .await?;

        for (position, product) in shop.products.iter().enumerate() {
            let created_at = started + TimeDelta::seconds(i64::try_from(position)?);
            sqlx::query(
                r"
                INSERT INTO product (name, price, image_url, is_favorite, shop_id, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(&product.name)
            .bind(product.price)
            .bind(&product.image_url)
            .bind(product.is_favorite)
            .bind(shop_id)
            .bind(created_at)
            .execute(&mut *tx)
            .await?;
        }
    }

    for coupon in &catalog.coupons {
        let code = CouponCode::parse(&coupon.code)?;
        sqlx::query(
            r"
            INSERT INTO coupon
                (code, discount, description, min_order_amount, expires_at, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(code.as_str())
        .bind(coupon.discount)
        .bind(&coupon.description)
        .bind(coupon.min_order_amount)
        .bind(coupon.expires_at)
        .bind(coupon.is_active)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!("Seeding complete!");
    info!("  Shops inserted: {}", catalog.shops.len());
    info!("  Products inserted: {}", catalog.product_count());
    info!("  Coupons inserted: {}", catalog.coupons.len());

    Ok(())
}
