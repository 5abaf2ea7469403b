//! Module for project submission endpoints.

pub mod handlers;
pub mod routes;
