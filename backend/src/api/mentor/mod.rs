//! Module for mentor endpoints.

pub mod handlers;
pub mod routes;
