//! Database query functions (Data Access Objects).
//!
//! This module centralizes all direct database operations, providing reusable
//! functions for interacting with the database and abstracting the query logic
//! from higher-level services and API handlers. Operations that need more than
//! one statement to stay consistent (joining a team, handing over leadership)
//! run inside a transaction here.

pub mod announcements;
pub mod evaluations;
pub mod feedback;
pub mod messages;
pub mod notifications;
pub mod schedule;
pub mod stats;
pub mod submissions;
pub mod surveys;
pub mod teams;
pub mod users;
