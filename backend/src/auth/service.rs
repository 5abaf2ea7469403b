//! Core business logic for the authentication system.
//!
//! This service handles user creation, password hashing, token issuance and
//! validation. It orchestrates interactions between handlers and the database.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::SqlitePool;
use tracing::{info, instrument};

use super::errors::{AuthError, AuthResult};
use super::models::{AuthResponse, Claims, LoginRequest, RegisterRequest, Role};
use crate::database::models::User;
use crate::database::queries::users::{self, NewUser};
use crate::errors::{AppError, AppResult};

const MIN_PASSWORD_LEN: usize = 6;

/// Signing material and lifetime for access tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, user: &User) -> AuthResult<String> {
        self.issue_with_ttl(user, self.ttl)
    }

    fn issue_with_ttl(&self, user: &User, ttl: Duration) -> AuthResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| AuthError::TokenCreation(err.to_string()))
    }

    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Hashing(err.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_registration(req: &RegisterRequest) -> AppResult<()> {
    if req.name.trim().is_empty() {
        return Err(AppError::bad_request("Name is required"));
    }
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::bad_request("A valid email is required"));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[instrument(skip_all, fields(email = %req.email))]
pub async fn register(pool: &SqlitePool, keys: &JwtKeys, req: RegisterRequest) -> AppResult<AuthResponse> {
    validate_registration(&req)?;

    let role = req.role.unwrap_or(Role::Student);
    if !role.is_self_assignable() {
        return Err(AppError::forbidden(format!("Cannot self-register as {role}")));
    }

    let email = normalize_email(&req.email);
    if users::get_user_by_email(pool, &email).await?.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = hash_password(&req.password)?;
    let user = users::create_user(
        pool,
        NewUser {
            name: req.name.trim(),
            email: &email,
            password_hash: &password_hash,
            role,
        },
    )
    .await
    .map_err(|err| {
        if err.is_unique_violation() {
            AppError::conflict("Email already registered")
        } else {
            err.into()
        }
    })?;

    info!(user_id = %user.id, role = %user.role, "registered user");
    let token = keys.issue(&user)?;
    Ok(AuthResponse { token, user })
}

#[instrument(skip_all, fields(email = %req.email))]
pub async fn login(pool: &SqlitePool, keys: &JwtKeys, req: LoginRequest) -> AppResult<AuthResponse> {
    let email = normalize_email(&req.email);
    let user = users::get_user_by_email(pool, &email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = keys.issue(&user)?;
    Ok(AuthResponse { token, user })
}

/// Ensure the configured admin account exists. Existing accounts are left alone.
pub async fn bootstrap_admin(pool: &SqlitePool, email: &str, password: &str) -> AppResult<()> {
    let email = normalize_email(email);
    if users::get_user_by_email(pool, &email).await?.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    let admin = users::create_user(
        pool,
        NewUser {
            name: "Administrator",
            email: &email,
            password_hash: &password_hash,
            role: Role::Admin,
        },
    )
    .await?;

    info!(user_id = %admin.id, "created bootstrap admin account");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    fn register_req(email: &str, role: Option<Role>) -> RegisterRequest {
        RegisterRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            role,
        }
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let db = Database::open_in_memory().await.unwrap();
        let keys = JwtKeys::new("unit-test-secret-value", 1);

        let registered = register(db.pool(), &keys, register_req("  Ada@Example.com ", None))
            .await
            .unwrap();
        assert_eq!(registered.user.email, "ada@example.com");
        assert_eq!(registered.user.role, Role::Student);

        let claims = keys.verify(&registered.token).unwrap();
        assert_eq!(claims.sub, registered.user.id);

        let logged_in = login(
            db.pool(),
            &keys,
            LoginRequest {
                email: "ADA@example.com".to_string(),
                password: "hunter22".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);

        let bad = login(
            db.pool(),
            &keys,
            LoginRequest {
                email: "ada@example.com".to_string(),
                password: "nope".to_string(),
            },
        )
        .await;
        assert!(matches!(bad, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_privileged_roles() {
        let db = Database::open_in_memory().await.unwrap();
        let keys = JwtKeys::new("unit-test-secret-value", 1);

        register(db.pool(), &keys, register_req("ada@example.com", None)).await.unwrap();
        let dup = register(db.pool(), &keys, register_req("ADA@example.com", None)).await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));

        let admin = register(db.pool(), &keys, register_req("boss@example.com", Some(Role::Admin))).await;
        assert!(matches!(admin, Err(AppError::Forbidden(_))));

        let mut short = register_req("short@example.com", None);
        short.password = "abc".to_string();
        assert!(matches!(
            register(db.pool(), &keys, short).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_expired_and_foreign_tokens_are_rejected() {
        let db = Database::open_in_memory().await.unwrap();
        let keys = JwtKeys::new("unit-test-secret-value", 1);
        let auth = register(db.pool(), &keys, register_req("ada@example.com", None))
            .await
            .unwrap();

        let expired = keys.issue_with_ttl(&auth.user, Duration::hours(-2)).unwrap();
        assert!(matches!(keys.verify(&expired), Err(AuthError::ExpiredToken)));

        let other = JwtKeys::new("a-completely-different-secret", 1);
        assert!(matches!(other.verify(&auth.token), Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_bootstrap_admin_is_idempotent() {
        let db = Database::open_in_memory().await.unwrap();
        bootstrap_admin(db.pool(), "root@example.com", "rootpass").await.unwrap();
        bootstrap_admin(db.pool(), "root@example.com", "rootpass").await.unwrap();

        let admins = users::list_users(db.pool(), Some(Role::Admin)).await.unwrap();
        assert_eq!(admins.len(), 1);
    }
}
