//! Defines the HTTP routes for project submissions.

use axum::routing::get;
use axum::Router;

use super::handlers::{delete_submission, get_submission, list_submissions, my_submission, submit};
use crate::state::AppState;

pub fn submission_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_submissions).post(submit))
        .route("/mine", get(my_submission))
        .route("/{id}", get(get_submission).delete(delete_submission))
}
