//! Defines the HTTP routes for user profiles and account management.

use axum::routing::{get, put};
use axum::Router;

use super::handlers::{delete_user, get_user, list_users, update_me, update_role};
use crate::auth::handlers::me;
use crate::state::AppState;

pub fn user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(me).put(update_me))
        .route("/{id}", get(get_user).delete(delete_user))
        .route("/{id}/role", put(update_role))
}
