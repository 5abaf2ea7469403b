//! Application state shared by every request handler.

use std::sync::Arc;

use adapters::{FileAdapter, LocalDiskAdapter, MemoryAdapter};
use tracing::info;

use crate::auth::service::{self, JwtKeys};
use crate::config::Config;
use crate::database::Database;
use crate::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub jwt: Arc<JwtKeys>,
    pub files: Arc<dyn FileAdapter>,
}

impl AppState {
    /// Connects to the database, prepares upload storage and seeds the admin account.
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config.database_url).await?;

        let files: Arc<dyn FileAdapter> = if config.upload_dir.trim().is_empty() {
            Arc::new(MemoryAdapter::new())
        } else {
            Arc::new(LocalDiskAdapter::new(&config.upload_dir).await?)
        };
        info!(adapter = files.name(), "Upload storage ready");

        if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
            service::bootstrap_admin(db.pool(), email, password).await?;
        }

        Ok(Self::from_parts(config, db, files))
    }

    pub fn from_parts(config: Config, db: Database, files: Arc<dyn FileAdapter>) -> Self {
        let jwt = JwtKeys::new(&config.jwt_secret, config.jwt_ttl_hours);
        Self {
            config: Arc::new(config),
            db,
            jwt: Arc::new(jwt),
            files,
        }
    }

    /// Fully in-memory state for tests.
    pub async fn in_memory(config: Config) -> AppResult<Self> {
        let db = Database::open_in_memory().await.map_err(AppError::from)?;
        Ok(Self::from_parts(config, db, Arc::new(MemoryAdapter::new())))
    }
}
