// handlers/protected/booking.rs - POST /booking
//
// Listing, showing, updating and deleting bookings go through the generic
// handlers in `owned`; only creation needs the flight lookup.
use axum::extract::State;
use axum::Extension;
use tracing::info;

use crate::database::models::{Booking, Flight};
use crate::database::repository::text;
use crate::database::{FieldValue, Scope};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody};
use crate::state::AppState;

use super::owned::UserOwned;

/// POST /booking - book an existing flight at its current price
pub async fn store(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    JsonBody(body): JsonBody,
) -> ApiResult<Booking> {
    let mut fields = <Booking as UserOwned>::CREATE_RULES.extract(&body)?;
    let flight_id = fields.integer("flight_id").unwrap_or_default();

    let flight = state
        .repo::<Flight>()
        .find(Scope::Public, flight_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Flight not found"))?;

    if fields.get("payment_status").is_none() {
        fields.set("payment_status", text(Booking::DEFAULT_PAYMENT_STATUS));
    }
    fields.set("total_price", FieldValue::Real(flight.price));
    fields.set("reference_code", text(Booking::generate_reference()));

    let booking = state.repo::<Booking>().create(caller.scope(), fields).await?;

    info!(
        "User {} booked flight {} as {}",
        caller.id(),
        flight.id,
        booking.reference_code
    );
    Ok(ApiResponse::created("Booking created successfully.", booking))
}
