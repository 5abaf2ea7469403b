//! Module for core business logic services.
//!
//! This module encapsulates the rules that sit between the API handlers and
//! the data access layer: team formation, submissions, judging, leaderboard
//! ranking and notification fan-out.

pub mod judging;
pub mod leaderboard;
pub mod notifier;
pub mod submissions;
pub mod teams;
