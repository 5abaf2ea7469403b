//! Module for organizer-facing endpoints.
//!
//! Coordinators publish the event schedule and announcements, and watch the
//! leaderboard and overall statistics. Reading the schedule, announcements
//! and leaderboard is open to every signed-in user.

pub mod announcements;
pub mod handlers;
pub mod routes;
pub mod schedule;
