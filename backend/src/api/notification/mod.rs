//! Module for the per-user notification feed.
//!
//! Notifications are written by other parts of the system (team joins,
//! submissions, feedback, messages and announcements) and only read and
//! cleared through these endpoints.

pub mod handlers;
pub mod routes;
