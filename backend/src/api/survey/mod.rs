//! Module for post-event surveys.

pub mod handlers;
pub mod routes;
