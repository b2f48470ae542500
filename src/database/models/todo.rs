use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub due_date: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Resource for Todo {
    const TABLE: &'static str = "todos";
    const LABEL: &'static str = "Todo";
    const OWNER_COLUMN: Option<&'static str> = Some("user_id");
    const ORDER_BY: &'static str = "created_at DESC, id DESC";
}
