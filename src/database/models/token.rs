use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// A row from `personal_access_tokens`. Only the SHA-256 of the secret is stored.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AccessToken {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub last_used_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}
