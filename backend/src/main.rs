//! Main entry point for the HackPortal backend.
//!
//! Installs logging, reads configuration from the environment and hands
//! over to `hackportal::start_server`.

use hackportal::config::Config;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = hackportal::start_server(config).await {
        error!("{err}");
        std::process::exit(1);
    }
}
