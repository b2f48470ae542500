use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::repository::{Repository, Resource};

/// Public catalogue row. Any authenticated caller may create, update or
/// delete flights; there is no owner column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Flight {
    pub id: i64,
    pub flight_number: String,
    pub airline: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub price: f64,
    pub seats_available: i64,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Resource for Flight {
    const TABLE: &'static str = "flights";
    const LABEL: &'static str = "Flight";
    const OWNER_COLUMN: Option<&'static str> = None;
    const ORDER_BY: &'static str = "created_at DESC, id DESC";
}

impl Repository<Flight> {
    /// Flights departing within `[from, until]`, optionally to one destination
    pub async fn departing_between(
        &self,
        from: NaiveDateTime,
        until: NaiveDateTime,
        destination: Option<&str>,
    ) -> Result<Vec<Flight>, DatabaseError> {
        let mut sql = String::from("SELECT * FROM flights WHERE departure_time BETWEEN ? AND ?");
        if destination.is_some() {
            sql.push_str(" AND destination = ?");
        }
        sql.push_str(" ORDER BY departure_time ASC, id ASC");
        debug!("{}", sql);

        let mut q = sqlx::query_as::<_, Flight>(&sql).bind(from).bind(until);
        if let Some(destination) = destination {
            q = q.bind(destination);
        }
        Ok(q.fetch_all(self.pool()).await?)
    }
}
