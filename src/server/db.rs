//! Database pool configuration and schema

use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS phrases (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        phrase TEXT NOT NULL,
        author TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_id ON phrases(id)",
];

/// Open a pool on an existing database.
///
/// Fails instead of creating the file when it does not exist, so a missing
/// database is reported as unavailable rather than silently empty.
pub async fn open_existing(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(false);

    SqlitePoolOptions::new()
        // Readers only; SQLite handles these concurrently
        .max_connections(8)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect_with(options)
        .await
}

/// Open a writable pool, creating the database file if needed
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        // Single writer
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))
}

/// Single-connection in-memory database. Every connection to `:memory:` is a
/// separate database, so the pool must not grow.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open in-memory database: {}", e))
}

/// Create the `phrases` table and its index if missing
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA.iter().copied() {
        sqlx::query(statement).execute(pool).await?;
    }
    debug!("Phrase schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_existing_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let url = format!("sqlite:{}", path.display());

        assert!(open_existing(&url).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let pool = create_memory_pool().await.unwrap();
        ensure_schema(&pool).await.unwrap();
        ensure_schema(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM phrases")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
