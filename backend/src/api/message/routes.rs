//! Defines the HTTP routes for direct messages.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{conversation, inbox, mark_read, send, sent};
use crate::state::AppState;

pub fn message_router() -> Router<AppState> {
    Router::new()
        .route("/", post(send))
        .route("/inbox", get(inbox))
        .route("/sent", get(sent))
        .route("/with/{user_id}", get(conversation))
        .route("/{id}/read", post(mark_read))
}
