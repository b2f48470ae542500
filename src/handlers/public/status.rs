// handlers/public/status.rs - GET /, GET /health
use axum::extract::State;
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> ApiResult<Value> {
    Ok(ApiResponse::ok(
        "Travel API",
        json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        }),
    ))
}

/// GET /health - liveness plus a database round trip
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    DatabaseManager::health_check(&state.pool)
        .await
        .map_err(|e| ApiError::internal("Database is unavailable.", e))?;

    Ok(ApiResponse::ok("OK", json!({ "database": "connected" })))
}
