//! SQLite connection pool and schema bootstrap

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::domain::DomainError;

/// Path value that selects a private in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// SQLite storage configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Database file path, or [`IN_MEMORY_PATH`]
    pub path: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection acquire timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            path: "app.db".to_string(),
            max_connections: 5,
            connect_timeout_secs: 30,
        }
    }
}

impl SqliteConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Configuration for a throwaway in-memory database
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_PATH)
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }

    fn url(&self) -> String {
        if self.is_in_memory() {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}", self.path)
        }
    }
}

/// Open a connection pool and make sure the `users` table exists
pub async fn connect(config: &SqliteConfig) -> Result<SqlitePool, DomainError> {
    let options = SqliteConnectOptions::from_str(&config.url())
        .map_err(|e| DomainError::configuration(format!("Invalid SQLite path: {}", e)))?
        .create_if_missing(true);

    let mut pool_options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs));

    // Every in-memory connection is its own database, so keep exactly one alive
    pool_options = if config.is_in_memory() {
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.max_connections)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to open SQLite database: {}", e)))?;

    info!(path = %config.path, "SQLite connection established");

    ensure_schema(&pool).await?;

    Ok(pool)
}

/// Create the `users` table if it is missing
///
/// Username uniqueness is enforced here, by the table constraint.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

    debug!("users table ready");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_config_default() {
        let config = SqliteConfig::default();

        assert_eq!(config.path, "app.db");
        assert_eq!(config.max_connections, 5);
        assert!(!config.is_in_memory());
        assert_eq!(config.url(), "sqlite://app.db");
    }

    #[test]
    fn test_sqlite_config_in_memory() {
        let config = SqliteConfig::in_memory().with_max_connections(8);

        assert!(config.is_in_memory());
        assert_eq!(config.url(), "sqlite::memory:");
        assert_eq!(config.max_connections, 8);
    }

    #[tokio::test]
    async fn test_connect_in_memory_creates_schema() {
        let pool = connect(&SqliteConfig::in_memory()).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);

        // Running the bootstrap twice is harmless
        ensure_schema(&pool).await.unwrap();
    }
}
