//! Middleware for protecting authenticated routes and handling authorization.
//!
//! `AuthUser` validates the bearer JWT on a request and loads the caller's
//! current account, so role changes and deletions take effect without waiting
//! for the token to expire. Role checks are methods on the extracted user.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::errors::AuthError;
use super::models::Role;
use crate::database::models::User;
use crate::database::queries::users;
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// The authenticated caller of a request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn user(&self) -> &User {
        &self.0
    }

    /// Fails with 403 unless the caller has one of `roles`.
    pub fn require(&self, roles: &[Role]) -> AppResult<()> {
        allow(roles.contains(&self.0.role))
    }

    pub fn require_organizer(&self) -> AppResult<()> {
        allow(self.0.role.is_organizer())
    }

    pub fn require_staff(&self) -> AppResult<()> {
        allow(self.0.role.is_staff())
    }
}

fn allow(permitted: bool) -> AppResult<()> {
    if permitted {
        Ok(())
    } else {
        Err(AuthError::Forbidden.into())
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken)?;

    let (scheme, token) = header.split_once(' ').ok_or(AuthError::InvalidToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AuthError::InvalidToken);
    }
    Ok(token.trim())
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let token = bearer_token(parts)?;
        let claims = state.jwt.verify(token)?;

        let user = users::get_user(state.db.pool(), &claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(AuthUser(user))
    }
}
