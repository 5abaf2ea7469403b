//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while storing or fetching uploaded
//! files, providing a unified error handling mechanism for every adapter.

use thiserror::Error;

pub type AdapterResult<T> = Result<T, AdapterError>;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),
}
