// handlers/protected/flight.rs - flight catalogue mutations
//
// Flights have no owner: any authenticated caller may create, update or
// delete any flight.
use axum::extract::State;
use axum::Extension;
use tracing::info;

use crate::database::models::Flight;
use crate::database::Scope;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody, PathParams};
use crate::state::AppState;
use crate::validation::rules;

/// POST /flight
pub async fn store(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    JsonBody(body): JsonBody,
) -> ApiResult<Flight> {
    let fields = rules::FLIGHT.extract(&body)?;
    let flight = state.repo::<Flight>().create(Scope::Public, fields).await?;

    info!("User {} created flight {}", caller.id(), flight.id);
    Ok(ApiResponse::created("Flight created successfully.", flight))
}

/// PUT /flight/:id - 404 for an unknown id comes before body validation
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams(id): PathParams<i64>,
    JsonBody(body): JsonBody,
) -> ApiResult<Flight> {
    let repo = state.repo::<Flight>();
    repo.get(Scope::Public, id).await?;

    let fields = rules::FLIGHT.extract(&body)?;
    let flight = repo.update(Scope::Public, id, fields).await?;

    info!("User {} updated flight {}", caller.id(), flight.id);
    Ok(ApiResponse::ok("Flight updated successfully.", flight))
}

/// DELETE /flight/:id
pub async fn destroy(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams(id): PathParams<i64>,
) -> ApiResult<Flight> {
    let flight = state.repo::<Flight>().delete(Scope::Public, id).await?;

    info!("User {} deleted flight {}", caller.id(), flight.id);
    Ok(ApiResponse::ok("Flight deleted successfully.", flight))
}
