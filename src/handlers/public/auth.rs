// handlers/public/auth.rs - POST /register, POST /login
use axum::extract::State;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::auth::{self, AuthError};
use crate::config::config;
use crate::database::models::User;
use crate::database::{DatabaseError, FieldValue, Scope};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;
use crate::validation::{rules, FieldErrors, ValidationErrors};

const EMAIL_TAKEN: &str = "The email has already been taken.";

/// `data` of a successful register or login
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// POST /register - create an account and hand back its first token
///
/// Field rules and the email uniqueness check are reported together, so a
/// taken email with a short password yields two field errors in one 400.
pub async fn register(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult<AuthPayload> {
    let mut extra = FieldErrors::new();
    if let Some(email) = body.get("email").and_then(Value::as_str) {
        if User::email_taken(&state.pool, email).await? {
            extra.insert("email".to_string(), vec![EMAIL_TAKEN.to_string()]);
        }
    }

    let mut fields = rules::REGISTER.extract_with(&body, extra)?;
    let password = match fields.remove("password") {
        Some(FieldValue::Text(password)) => password,
        _ => return Err(ValidationErrors::single("password", "The password field is required.").into()),
    };
    fields.set("password", FieldValue::Text(auth::hash_password(&password)?));

    // Two concurrent registrations can both pass the uniqueness check
    let user = match state.repo::<User>().create(Scope::Public, fields).await {
        Ok(user) => user,
        Err(DatabaseError::Sqlx(sqlx::Error::Database(db))) if db.is_unique_violation() => {
            return Err(ValidationErrors::single("email", EMAIL_TAKEN).into());
        }
        Err(e) => return Err(e.into()),
    };

    let token = auth::issue_token(&state.pool, user.id, &config().security.token_name).await?;
    info!("Registered user {} <{}>", user.id, user.email);

    Ok(ApiResponse::created(
        "User registered successfully.",
        AuthPayload { user, token },
    ))
}

/// POST /login - exchange email and password for a new token
///
/// Earlier tokens of the same user stay valid.
pub async fn login(State(state): State<AppState>, JsonBody(body): JsonBody) -> ApiResult<AuthPayload> {
    let fields = rules::LOGIN.extract(&body)?;
    let email = fields.text("email").unwrap_or_default();
    let password = fields.text("password").unwrap_or_default();

    let user = match User::find_by_email(&state.pool, email).await? {
        Some(user) if auth::verify_password(password, &user.password)? => user,
        _ => {
            warn!("Rejected login for <{}>", email);
            return Err(ApiError::from(AuthError::InvalidCredentials));
        }
    };

    let token = auth::issue_token(&state.pool, user.id, &config().security.token_name).await?;
    info!("User {} logged in", user.id);

    Ok(ApiResponse::ok("Login successful.", AuthPayload { user, token }))
}
