//! Module for judging endpoints: scoring submissions and reviewing scores.

pub mod handlers;
pub mod routes;
