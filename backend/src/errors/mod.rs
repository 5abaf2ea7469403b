//! Global application error types and handlers.
//!
//! This module defines the error types used across the backend and the
//! conversion of every failure into the uniform `{status, message}` JSON body.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use adapters::AdapterError;

use crate::auth::errors::AuthError;

pub type DbResult<T> = Result<T, DbError>;

pub type AppResult<T> = Result<T, AppError>;

/// Failures coming out of the data access layer.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::Sqlx(sqlx::Error::Database(err)) => err.is_unique_violation(),
            _ => false,
        }
    }

    /// Unique violation on one specific `table.column`.
    pub fn violates_unique(&self, column: &str) -> bool {
        match self {
            DbError::Sqlx(sqlx::Error::Database(err)) => {
                err.is_unique_violation() && err.message().contains(column)
            }
            _ => false,
        }
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            DbError::Sqlx(sqlx::Error::Database(err)) => err.is_foreign_key_violation(),
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error(transparent)]
    Database(DbError),

    #[error("Storage error: {0}")]
    Storage(AdapterError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text sent to the client. Server-side failures are not described.
    fn public_message(&self) -> String {
        if self.status().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        if err.is_unique_violation() {
            AppError::Conflict("Resource already exists".to_string())
        } else if err.is_foreign_key_violation() {
            AppError::Conflict("Resource is still referenced".to_string())
        } else {
            AppError::Database(err)
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        DbError::from(err).into()
    }
}

impl From<AdapterError> for AppError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::NotFound(_) => AppError::NotFound("File not found".to_string()),
            AdapterError::InvalidKey(_) => AppError::BadRequest("Invalid file key".to_string()),
            other => AppError::Storage(other),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge("File is too large".to_string())
        } else {
            AppError::BadRequest(err.body_text())
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden => AppError::Forbidden(err.to_string()),
            AuthError::Hashing(message) => AppError::Internal(message),
            AuthError::TokenCreation(message) => AppError::Internal(message),
            other => AppError::Unauthorized(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), message = %self, "request rejected");
        }

        let body = ErrorBody {
            status: status.as_u16(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
