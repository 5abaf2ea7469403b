//! Defines the HTTP routes for uploading and serving files.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use super::handlers::{serve, upload};
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Nested under `/api/uploads`. The body limit is raised to the configured
/// file size so oversized uploads are cut off while streaming.
pub fn upload_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD))
}

/// Nested under `/uploads`, outside the API prefix, so stored URLs resolve.
pub fn file_router() -> Router<AppState> {
    Router::new().route("/{key}", get(serve))
}
