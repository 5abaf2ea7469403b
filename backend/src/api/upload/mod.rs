//! Module for file uploads and serving stored files.

pub mod handlers;
pub mod routes;
