//! Defines the HTTP routes for notifications.

use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers;
use crate::state::AppState;

pub fn notification_router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list))
        .route("/unread-count", get(handlers::unread_count))
        .route("/read-all", post(handlers::mark_all_read))
        .route("/{id}/read", post(handlers::mark_read))
        .route("/{id}", delete(handlers::delete))
}
