// handlers/protected/passenger.rs - /booking/:booking_id/passenger[/:passenger_id]
use axum::extract::State;
use axum::Extension;
use tracing::info;

use crate::database::models::{Booking, Passenger};
use crate::database::Scope;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody, PathParams};
use crate::state::AppState;
use crate::validation::rules;

/// Passengers of a booking the caller owns; anything else is "Booking not found"
async fn passenger_scope(state: &AppState, caller: &AuthUser, booking_id: i64) -> Result<Scope, ApiError> {
    let booking = state.repo::<Booking>().get(caller.scope(), booking_id).await?;
    Ok(Scope::Owner(booking.id))
}

pub async fn index(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams(booking_id): PathParams<i64>,
) -> ApiResult<Vec<Passenger>> {
    let scope = passenger_scope(&state, &caller, booking_id).await?;
    let passengers = state.repo::<Passenger>().list(scope).await?;
    Ok(ApiResponse::ok("List of passengers.", passengers))
}

pub async fn store(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams(booking_id): PathParams<i64>,
    JsonBody(body): JsonBody,
) -> ApiResult<Passenger> {
    let fields = rules::PASSENGER.extract(&body)?;
    let scope = passenger_scope(&state, &caller, booking_id).await?;
    let passenger = state.repo::<Passenger>().create(scope, fields).await?;

    info!("User {} added passenger {} to booking {}", caller.id(), passenger.id, booking_id);
    Ok(ApiResponse::created("Passenger added successfully.", passenger))
}

pub async fn show(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams((booking_id, passenger_id)): PathParams<(i64, i64)>,
) -> ApiResult<Passenger> {
    let scope = passenger_scope(&state, &caller, booking_id).await?;
    let passenger = state.repo::<Passenger>().get(scope, passenger_id).await?;
    Ok(ApiResponse::ok("Passenger details.", passenger))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams((booking_id, passenger_id)): PathParams<(i64, i64)>,
    JsonBody(body): JsonBody,
) -> ApiResult<Passenger> {
    let fields = rules::PASSENGER.extract(&body)?;
    let scope = passenger_scope(&state, &caller, booking_id).await?;
    let passenger = state.repo::<Passenger>().update(scope, passenger_id, fields).await?;
    Ok(ApiResponse::ok("Passenger updated successfully.", passenger))
}

pub async fn destroy(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams((booking_id, passenger_id)): PathParams<(i64, i64)>,
) -> ApiResult<Passenger> {
    let scope = passenger_scope(&state, &caller, booking_id).await?;
    let passenger = state.repo::<Passenger>().delete(scope, passenger_id).await?;
    Ok(ApiResponse::ok("Passenger removed successfully.", passenger))
}
