//! HackPortal backend.
//!
//! A REST API for running a hackathon: participants register and form teams,
//! submit projects and message each other; judges score submissions; mentors
//! coach their assigned teams; coordinators publish the schedule and
//! announcements and follow the leaderboard.
//!
//! # Layout
//! - `auth`: registration, login, JWT issuing and the `AuthUser` extractor
//! - `api`: the remaining HTTP routes, one module per area
//! - `services`: rules that need more than one query (teams, judging, ...)
//! - `database`: the sqlx pool, row models and queries
//! - `config`, `errors`, `middleware`, `state`: the plumbing
//!
//! Uploaded files go through the `adapters` crate so storage can be swapped
//! between local disk and memory.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tracing::info;

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod state;

use config::{Config, ConfigError};
use errors::{AppError, AppResult};
use state::AppState;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to initialize application state: {0}")]
    State(#[from] AppError),

    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

async fn root_handler() -> &'static str {
    "Welcome to HackPortal!"
}

async fn health_handler(State(state): State<AppState>) -> AppResult<Json<Health>> {
    state.db.health_check().await?;
    Ok(Json(Health { status: "ok" }))
}

/// Builds the full router for the given state.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::api_router(config.max_upload_bytes))
        .nest("/uploads", api::upload::routes::file_router())
        .layer(middleware::cors_layer(config.cors_origin.as_deref()))
        .layer(middleware::trace_layer())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
pub async fn start_server(config: Config) -> Result<(), StartupError> {
    info!("Initializing state...");
    let state = AppState::new(config).await?;
    let db = state.db.clone();

    let address = state.config.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!("Failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
