//! Data structures for authentication-related entities.
//!
//! This module defines user roles, JWT claims, and the request/response
//! payloads used for data transfer within the authentication flow.

use serde::{Deserialize, Serialize};

use crate::database::models::User;

/// Role a portal account acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Mentor,
    Judge,
    Coordinator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Mentor => "mentor",
            Role::Judge => "judge",
            Role::Coordinator => "coordinator",
            Role::Admin => "admin",
        }
    }

    /// Roles anyone may pick at sign-up.
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, Role::Student | Role::Mentor | Role::Judge)
    }

    /// Coordinators and admins run the event.
    pub fn is_organizer(&self) -> bool {
        matches!(self, Role::Coordinator | Role::Admin)
    }

    /// Everyone except students.
    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Student)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
