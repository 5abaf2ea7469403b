//! Defines the HTTP routes used by judges to score submissions.

use axum::routing::get;
use axum::Router;

use super::handlers::{evaluate, my_evaluations, pending_submissions, submission_evaluations};
use crate::state::AppState;

pub fn judge_router() -> Router<AppState> {
    Router::new()
        .route("/evaluations", get(my_evaluations).post(evaluate))
        .route("/pending", get(pending_submissions))
        .route("/submissions/{id}/evaluations", get(submission_evaluations))
}
