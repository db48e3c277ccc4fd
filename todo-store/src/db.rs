//! Connection pool construction
//!
//! The pool is the query executor every store operation runs against.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::TodoctlConfig;
use crate::error::Result;

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the initial connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/todos", 5).await?;
/// ```
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Create a pool from loaded configuration, with `override_url` taking
/// precedence over the config files.
pub async fn connect(config: &TodoctlConfig, override_url: Option<&str>) -> Result<PgPool> {
    let url = config.database_url(override_url)?;
    tracing::debug!(max_connections = config.max_connections(), "Connecting to database");
    create_pool(&url, config.max_connections()).await
}
