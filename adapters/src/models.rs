//! Generic data models for the `adapters` crate.
//!
//! These describe a stored file independently of the adapter holding it, so
//! the backend can treat local disk and in-memory storage the same way.

use serde::Serialize;

/// Metadata for a file held by a [`crate::FileAdapter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredFile {
    pub key: String,
    pub size: u64,
    pub content_type: String,
}

impl StoredFile {
    /// Public path the backend serves this file under.
    pub fn url(&self) -> String {
        format!("/uploads/{}", self.key)
    }
}
