//! Module for database connection setup and common utilities.
//!
//! This module is responsible for initializing the connection pool, running
//! the embedded migrations, and providing a central point for
//! database-related configuration and helpers.

pub mod models;
pub mod queries;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::DbResult;

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Handle to the portal database.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects to `url` and applies pending migrations.
    ///
    /// `sqlite::memory:` (or `:memory:`) opens a private in-memory database
    /// held on a single pooled connection, so every request sees the same data.
    pub async fn connect(url: &str) -> DbResult<Self> {
        if url == IN_MEMORY_URL || url == ":memory:" {
            return Self::open_in_memory().await;
        }

        info!("Opening database: {}", url);

        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .pragma("synchronous", "NORMAL")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        debug!("Database connection established");

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Open an in-memory database.
    pub async fn open_in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .foreign_keys(true);

        // Dropping the only connection would drop the database with it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
        debug!("Running database migrations");
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations complete");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn health_check(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Fresh primary key for a new row.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Timestamp for created_at/updated_at columns.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}
