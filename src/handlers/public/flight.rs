// handlers/public/flight.rs - read-only flight catalogue
use axum::extract::State;
use chrono::NaiveDateTime;

use crate::database::models::Flight;
use crate::database::Scope;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, PathParams};
use crate::state::AppState;
use crate::validation::{parse_date, parse_datetime, ValidationErrors};

/// GET /flight
pub async fn index(State(state): State<AppState>) -> ApiResult<Vec<Flight>> {
    let flights = state.repo::<Flight>().list(Scope::Public).await?;
    Ok(ApiResponse::ok("List of flights.", flights))
}

/// GET /flight/:id
pub async fn show(State(state): State<AppState>, PathParams(id): PathParams<i64>) -> ApiResult<Flight> {
    let flight = state.repo::<Flight>().get(Scope::Public, id).await?;
    Ok(ApiResponse::ok("Flight details.", flight))
}

/// GET /flight/:start_date/:end_date
pub async fn search_by_date(
    State(state): State<AppState>,
    PathParams((start, end)): PathParams<(String, String)>,
) -> ApiResult<Vec<Flight>> {
    search(&state, &start, &end, None).await
}

/// GET /flight/:start_date/:end_date/:destination
pub async fn search_by_destination(
    State(state): State<AppState>,
    PathParams((start, end, destination)): PathParams<(String, String, String)>,
) -> ApiResult<Vec<Flight>> {
    search(&state, &start, &end, Some(&destination)).await
}

async fn search(
    state: &AppState,
    start: &str,
    end: &str,
    destination: Option<&str>,
) -> ApiResult<Vec<Flight>> {
    let (from, until) = date_range(start, end)?;

    let flights = state
        .repo::<Flight>()
        .departing_between(from, until, destination)
        .await?;

    if flights.is_empty() {
        return Err(ApiError::not_found("No flights found for the specified date range."));
    }

    Ok(ApiResponse::ok("Flights matching the search.", flights))
}

/// Parse both bounds of a search; a bare `end` date runs to the end of that day
fn date_range(start: &str, end: &str) -> Result<(NaiveDateTime, NaiveDateTime), ValidationErrors> {
    let from = parse_datetime(start)
        .ok_or_else(|| ValidationErrors::single("start_date", "The start date field must be a valid date."))?;

    let until = match parse_date(end) {
        Some(day) => day.and_hms_milli_opt(23, 59, 59, 999),
        None => parse_datetime(end),
    }
    .ok_or_else(|| ValidationErrors::single("end_date", "The end date field must be a valid date."))?;

    Ok((from, until))
}
