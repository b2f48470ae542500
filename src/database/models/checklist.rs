use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Checklist {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Resource for Checklist {
    const TABLE: &'static str = "checklists";
    const LABEL: &'static str = "Checklist";
    const OWNER_COLUMN: Option<&'static str> = Some("user_id");
}

/// Owned by a checklist; reachable only after the checklist itself resolved
/// under the caller's scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChecklistItem {
    pub id: i64,
    pub checklist_id: i64,
    pub item_name: String,
    pub is_completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Resource for ChecklistItem {
    const TABLE: &'static str = "checklist_items";
    const LABEL: &'static str = "Checklist item";
    const OWNER_COLUMN: Option<&'static str> = Some("checklist_id");
}
