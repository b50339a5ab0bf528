//! Command implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

/// Connect using `BLOOM_DATABASE_URL`, falling back to `DATABASE_URL`.
///
/// Loads `.env` first if present.
async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("BLOOM_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "BLOOM_DATABASE_URL not set")?;

    tracing::info!("Connecting to database...");
    Ok(bloom_api::db::create_pool(&database_url).await?)
}
