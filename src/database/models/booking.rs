use chrono::{NaiveDate, NaiveDateTime};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub flight_id: i64,
    pub total_price: f64,
    pub payment_status: String,
    pub reference_code: String,
    pub booking_date: NaiveDateTime,
    pub cancellation_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Resource for Booking {
    const TABLE: &'static str = "bookings";
    const LABEL: &'static str = "Booking";
    const OWNER_COLUMN: Option<&'static str> = Some("user_id");
    const ORDER_BY: &'static str = "created_at DESC, id DESC";
}

impl Booking {
    pub const DEFAULT_PAYMENT_STATUS: &'static str = "pending";

    /// `BK-` followed by ten upper-case alphanumerics
    pub fn generate_reference() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(10)
            .map(|b| char::from(b).to_ascii_uppercase())
            .collect();
        format!("BK-{}", suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Passenger {
    pub id: i64,
    pub booking_id: i64,
    pub name: String,
    pub gender: String,
    pub date_of_birth: Option<NaiveDate>,
    pub passport_number: Option<String>,
    pub seat_number: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Resource for Passenger {
    const TABLE: &'static str = "passengers";
    const LABEL: &'static str = "Passenger";
    const OWNER_COLUMN: Option<&'static str> = Some("booking_id");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_are_prefixed_and_distinct() {
        let a = Booking::generate_reference();
        let b = Booking::generate_reference();
        assert!(a.starts_with("BK-"));
        assert_eq!(a.len(), 13);
        assert!(a[3..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_ne!(a, b);
    }
}
