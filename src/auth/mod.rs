//! Password hashing and opaque bearer tokens.
//!
//! A token handed to clients looks like `"{id}|{secret}"`. The `id` selects
//! the `personal_access_tokens` row and the row stores only the SHA-256 of
//! `secret`, so a leaked table cannot be replayed.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::distributions::Alphanumeric;
use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::database::models::{AccessToken, User};

const SECRET_LENGTH: usize = 40;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Malformed bearer token")]
    MalformedToken,

    #[error("Invalid or revoked token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token was already revoked")]
    AlreadyRevoked,

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Lowercase hex SHA-256 of a token secret
pub fn digest(secret: &str) -> String {
    format!("{:x}", Sha256::digest(secret.as_bytes()))
}

/// Split `"{id}|{secret}"` into its parts
pub fn parse_token(token: &str) -> Result<(i64, &str), AuthError> {
    let (id, secret) = token.split_once('|').ok_or(AuthError::MalformedToken)?;
    let id = id.parse::<i64>().map_err(|_| AuthError::MalformedToken)?;
    if secret.is_empty() {
        return Err(AuthError::MalformedToken);
    }
    Ok((id, secret))
}

fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_LENGTH)
        .map(char::from)
        .collect()
}

/// Persist a new token for `user_id` and return its plaintext form
pub async fn issue_token(pool: &SqlitePool, user_id: i64, name: &str) -> Result<String, AuthError> {
    let secret = generate_secret();

    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO personal_access_tokens (user_id, name, token_hash) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(user_id)
    .bind(name)
    .bind(digest(&secret))
    .fetch_one(pool)
    .await?;

    tracing::debug!("Issued access token {} for user {}", id, user_id);
    Ok(format!("{}|{}", id, secret))
}

/// Resolve a bearer token to its owner, touching `last_used_at`
pub async fn authenticate(pool: &SqlitePool, token: &str) -> Result<(User, AccessToken), AuthError> {
    let (id, secret) = parse_token(token)?;

    let access_token = sqlx::query_as::<_, AccessToken>("SELECT * FROM personal_access_tokens WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AuthError::InvalidToken)?;

    if access_token.token_hash != digest(secret) {
        return Err(AuthError::InvalidToken);
    }

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(access_token.user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AuthError::InvalidToken)?;

    sqlx::query("UPDATE personal_access_tokens SET last_used_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(access_token.id)
        .execute(pool)
        .await?;

    Ok((user, access_token))
}

/// Delete exactly one token
pub async fn revoke_token(pool: &SqlitePool, token_id: i64) -> Result<(), AuthError> {
    let result = sqlx::query("DELETE FROM personal_access_tokens WHERE id = ?")
        .bind(token_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AuthError::AlreadyRevoked);
    }
    Ok(())
}
