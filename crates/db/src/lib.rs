//! Document store access and the data-access layer built on it.
//!
//! - [`store`] -- the [`DocumentStore`] seam and its implementations.
//! - [`repositories`] -- typed project/profile access with seed fallback.
//! - [`sync`] -- two-phase admin writes driven through the core reducer.

use sqlx::postgres::PgPoolOptions;

pub mod repositories;
pub mod store;
pub mod sync;

pub use store::{DocumentStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the pool can reach the server.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
