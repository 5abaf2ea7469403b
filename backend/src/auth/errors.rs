//! Custom error types specific to authentication failures.
//!
//! This module defines the errors that can occur while issuing or checking
//! credentials. They convert into `AppError` for the HTTP response.

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authorization token")]
    MissingToken,

    #[error("Invalid authorization token")]
    InvalidToken,

    #[error("Authorization token has expired")]
    ExpiredToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("You do not have permission to perform this action")]
    Forbidden,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token creation failed: {0}")]
    TokenCreation(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        }
    }
}
