// handlers/protected/owned.rs - CRUD for resources owned directly by the caller
//
// One set of generic handlers serves /todo, /checklist and the read, update
// and delete half of /booking. Routing instantiates them per resource, e.g.
// `get(owned::index::<Todo>)`.
use axum::extract::State;
use axum::Extension;
use serde::Serialize;
use tracing::info;

use crate::database::models::{Booking, Checklist, Todo};
use crate::database::Resource;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, JsonBody, PathParams};
use crate::state::AppState;
use crate::validation::{rules, RuleSet};

/// A table whose owner column holds the caller's user id
pub trait UserOwned: Resource + Serialize + Sync {
    const CREATE_RULES: RuleSet;
    const UPDATE_RULES: RuleSet;
    /// Used in list messages, e.g. "List of todos."
    const PLURAL: &'static str;
}

impl UserOwned for Todo {
    const CREATE_RULES: RuleSet = rules::TODO;
    const UPDATE_RULES: RuleSet = rules::TODO;
    const PLURAL: &'static str = "todos";
}

impl UserOwned for Checklist {
    const CREATE_RULES: RuleSet = rules::CHECKLIST;
    const UPDATE_RULES: RuleSet = rules::CHECKLIST;
    const PLURAL: &'static str = "checklists";
}

impl UserOwned for Booking {
    const CREATE_RULES: RuleSet = rules::BOOKING_CREATE;
    const UPDATE_RULES: RuleSet = rules::BOOKING_UPDATE;
    const PLURAL: &'static str = "bookings";
}

pub async fn index<T: UserOwned>(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<Vec<T>> {
    let rows = state.repo::<T>().list(caller.scope()).await?;
    Ok(ApiResponse::ok(format!("List of {}.", T::PLURAL), rows))
}

pub async fn show<T: UserOwned>(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams(id): PathParams<i64>,
) -> ApiResult<T> {
    let row = state.repo::<T>().get(caller.scope(), id).await?;
    Ok(ApiResponse::ok(format!("{} details.", T::LABEL), row))
}

pub async fn store<T: UserOwned>(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    JsonBody(body): JsonBody,
) -> ApiResult<T> {
    let fields = T::CREATE_RULES.extract(&body)?;
    let row = state.repo::<T>().create(caller.scope(), fields).await?;

    info!("User {} created a row in {}", caller.id(), T::TABLE);
    Ok(ApiResponse::created(format!("{} created successfully.", T::LABEL), row))
}

/// The row is resolved under the caller's scope before the body is checked,
/// so a missing or foreign id is a 404 whatever the body holds.
pub async fn update<T: UserOwned>(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams(id): PathParams<i64>,
    JsonBody(body): JsonBody,
) -> ApiResult<T> {
    let repo = state.repo::<T>();
    repo.get(caller.scope(), id).await?;

    let fields = T::UPDATE_RULES.extract(&body)?;
    let row = repo.update(caller.scope(), id, fields).await?;
    Ok(ApiResponse::ok(format!("{} updated successfully.", T::LABEL), row))
}

pub async fn destroy<T: UserOwned>(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    PathParams(id): PathParams<i64>,
) -> ApiResult<T> {
    let row = state.repo::<T>().delete(caller.scope(), id).await?;

    info!("User {} deleted row {} from {}", caller.id(), id, T::TABLE);
    Ok(ApiResponse::ok(format!("{} deleted successfully.", T::LABEL), row))
}
