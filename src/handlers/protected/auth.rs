// handlers/protected/auth.rs - POST /logout, GET /user
use axum::extract::State;
use axum::Extension;
use tracing::info;

use crate::auth;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// POST /logout - revoke the token that authenticated this request
///
/// Other tokens of the same user are untouched.
pub async fn logout(State(state): State<AppState>, Extension(caller): Extension<AuthUser>) -> ApiResult<Option<()>> {
    auth::revoke_token(&state.pool, caller.token_id)
        .await
        .map_err(|e| ApiError::from(e).context("An error occurred during logout."))?;

    info!("User {} logged out (token {})", caller.id(), caller.token_id);
    Ok(ApiResponse::message_only("Logged out successfully."))
}

/// GET /user - the authenticated caller
pub async fn whoami(Extension(caller): Extension<AuthUser>) -> ApiResult<User> {
    Ok(ApiResponse::ok("Authenticated user.", caller.user))
}
