//! Module for user profile and management API endpoints.
//!
//! This module handles functionalities related to user information that is
//! distinct from the core authentication process, such as profile updates,
//! role changes and account removal.

pub mod handlers;
pub mod routes;
