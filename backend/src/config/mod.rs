//! Central module for application-wide configuration settings.
//!
//! Settings come from environment variables (optionally seeded from a `.env`
//! file): server address, database URL, JWT secret and lifetime, upload
//! storage, CORS origin and the bootstrap admin account.

use serde::Deserialize;
use thiserror::Error;

const MIN_JWT_SECRET_LEN: usize = 16;

fn default_host() -> String {
    String::from("0.0.0.0")
}

fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    String::from("sqlite::memory:")
}

fn default_jwt_ttl_hours() -> i64 {
    24
}

fn default_upload_dir() -> String {
    String::from("uploads")
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database_url")]
    pub database_url: String,

    pub jwt_secret: String,
    #[serde(default = "default_jwt_ttl_hours")]
    pub jwt_ttl_hours: i64,

    /// Directory for uploaded files. Empty keeps uploads in memory.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Allowed browser origin. Unset allows any origin.
    #[serde(default)]
    pub cors_origin: Option<String>,

    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

impl Config {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {err}");
        }

        let config: Config = ::config::Config::builder()
            .add_source(::config::Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::Invalid(format!(
                "JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} bytes"
            )));
        }
        if self.jwt_ttl_hours <= 0 {
            return Err(ConfigError::Invalid(
                "JWT_TTL_HOURS must be positive".to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "MAX_UPLOAD_BYTES must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// In-memory database and uploads, for tests.
    pub fn for_tests() -> Self {
        Self {
            host: default_host(),
            port: 0,
            database_url: default_database_url(),
            jwt_secret: String::from("test-secret-that-is-long-enough"),
            jwt_ttl_hours: default_jwt_ttl_hours(),
            upload_dir: String::new(),
            max_upload_bytes: 1024 * 1024,
            cors_origin: None,
            admin_email: None,
            admin_password: None,
        }
    }
}
