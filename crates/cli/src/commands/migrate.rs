//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! bloom-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `BLOOM_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/` and are embedded at build time:
//! ```text
//! migrations/
//! ├── 20250101000001_create_catalog.sql
//! └── 20250101000002_create_orders.sql
//! ```

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
