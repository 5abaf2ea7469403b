//! Module for one-to-one messaging between participants.

pub mod handlers;
pub mod routes;
