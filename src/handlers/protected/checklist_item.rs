// handlers/protected/checklist_item.rs - /checklist/:checklist_id/item[/...]
//
// Items are owned by a checklist, which is owned by a user. Every handler
// first resolves the checklist under the caller's scope; a foreign or
// missing checklist is "Checklist not found" and nothing is touched.
use axum::extract::State;
use axum::Extension;
use tracing::info;

use crate::database::models::{Checklist, ChecklistItem};
use crate::database::Scope;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody, PathParams};
use crate::state::AppState;
use crate::validation::rules;

async fn item_scope(state: &AppState, caller: &AuthUser, checklist_id: i64) -> Result<Scope, ApiError> {
    let checklist = state.repo::<Checklist>().get(caller.scope(), checklist_id).await?;
    Ok(Scope::Owner(checklist.id))
}

/// GET /checklist/:checklist_id/item
pub async fn index(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams(checklist_id): PathParams<i64>,
) -> ApiResult<Vec<ChecklistItem>> {
    let scope = item_scope(&state, &caller, checklist_id).await?;
    let items = state.repo::<ChecklistItem>().list(scope).await?;
    Ok(ApiResponse::ok("List of checklist items.", items))
}

/// POST /checklist/:checklist_id/item
pub async fn store(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams(checklist_id): PathParams<i64>,
    JsonBody(body): JsonBody,
) -> ApiResult<ChecklistItem> {
    let fields = rules::CHECKLIST_ITEM_NAME.extract(&body)?;
    let scope = item_scope(&state, &caller, checklist_id).await?;
    let item = state.repo::<ChecklistItem>().create(scope, fields).await?;

    info!("User {} added item {} to checklist {}", caller.id(), item.id, checklist_id);
    Ok(ApiResponse::created("Checklist item created successfully.", item))
}

/// GET /checklist/:checklist_id/item/:item_id
pub async fn show(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams((checklist_id, item_id)): PathParams<(i64, i64)>,
) -> ApiResult<ChecklistItem> {
    let scope = item_scope(&state, &caller, checklist_id).await?;
    let item = state.repo::<ChecklistItem>().get(scope, item_id).await?;
    Ok(ApiResponse::ok("Checklist item details.", item))
}

/// PUT /checklist/:checklist_id/item/:item_id - set `is_completed`
pub async fn update_status(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams((checklist_id, item_id)): PathParams<(i64, i64)>,
    JsonBody(body): JsonBody,
) -> ApiResult<ChecklistItem> {
    let fields = rules::CHECKLIST_ITEM_STATUS.extract(&body)?;
    let scope = item_scope(&state, &caller, checklist_id).await?;
    let item = state.repo::<ChecklistItem>().update(scope, item_id, fields).await?;
    Ok(ApiResponse::ok("Checklist item status updated successfully.", item))
}

/// PUT /checklist/:checklist_id/item/rename/:item_id
pub async fn rename(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams((checklist_id, item_id)): PathParams<(i64, i64)>,
    JsonBody(body): JsonBody,
) -> ApiResult<ChecklistItem> {
    let fields = rules::CHECKLIST_ITEM_NAME.extract(&body)?;
    let scope = item_scope(&state, &caller, checklist_id).await?;
    let item = state.repo::<ChecklistItem>().update(scope, item_id, fields).await?;
    Ok(ApiResponse::ok("Checklist item renamed successfully.", item))
}

/// DELETE /checklist/:checklist_id/item/:item_id
pub async fn destroy(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams((checklist_id, item_id)): PathParams<(i64, i64)>,
) -> ApiResult<ChecklistItem> {
    let scope = item_scope(&state, &caller, checklist_id).await?;
    let item = state.repo::<ChecklistItem>().delete(scope, item_id).await?;
    Ok(ApiResponse::ok("Checklist item deleted successfully.", item))
}
