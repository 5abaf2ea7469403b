//! Module for team formation endpoints: create, join by code, leave and
//! mentor assignment.

pub mod handlers;
pub mod routes;
