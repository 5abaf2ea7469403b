//! General-purpose middleware for the API.
//!
//! This module contains the reusable layers applied to the whole Axum router:
//! CORS for the browser frontend and per-request tracing spans.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{warn, Level};

const CORS_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// CORS for the frontend. `None` allows any origin; an unparsable origin
/// allows none.
pub fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(str::trim).filter(|o| !o.is_empty()) {
        None => AllowOrigin::from(Any),
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS_ORIGIN, cross-origin requests are blocked");
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        },
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(CORS_MAX_AGE)
}

/// One `info` span per request, with status and latency logged on response.
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
