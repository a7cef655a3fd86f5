//! Handlers for the `/tasks` resource.
//!
//! The list endpoint folds its query parameters into a [`TaskFilter`] and
//! lets the repository render it; the caller's id is always part of the
//! query, whatever the parameters say.
//!
//! [`TaskFilter`]: tasktrack_core::task::TaskFilter

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tasktrack_core::error::CoreError;
use tasktrack_core::task::build_filter_set;
use tasktrack_core::types::DbId;
use tasktrack_db::models::task::{TaskInput, TaskListParams};
use tasktrack_db::repositories::{CategoryRepo, TaskRepo};
use tasktrack_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Task";

/// GET /api/v1/tasks
///
/// Query: `status`, `priority`, `category`, `search`, `page`. Returns
/// `{ data, meta }`, ten tasks per page, newest first.
pub async fn list_tasks(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TaskListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = build_filter_set(params.filter_params())?;
    let page = params.page();

    let result = TaskRepo::list_filtered(&state.pool, auth.user_id, &filter, page).await?;

    tracing::debug!(
        user_id = auth.user_id,
        page,
        total = result.meta.total,
        predicates = filter.predicates().len(),
        "Tasks listed",
    );

    Ok(Json(result))
}

/// POST /api/v1/tasks
pub async fn create_task(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<TaskInput>,
) -> AppResult<impl IntoResponse> {
    let fields = input.into_fields()?;
    ensure_category_owned(&state.pool, auth.user_id, fields.category_id).await?;

    let task = TaskRepo::create(&state.pool, auth.user_id, &fields).await?;

    tracing::info!(task_id = task.id, user_id = auth.user_id, "Task created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// GET /api/v1/tasks/{id}
///
/// A single task with its category resolved.
pub async fn get_task(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = TaskRepo::find_by_id(&state.pool, id).await?;
    auth.authorize(existing, ENTITY, id)?;

    let task = TaskRepo::find_with_category(&state.pool, auth.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    Ok(Json(DataResponse { data: task }))
}

/// PUT /api/v1/tasks/{id}
///
/// Full replace of the editable fields. Ownership is checked before the payload.
pub async fn update_task(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<TaskInput>,
) -> AppResult<impl IntoResponse> {
    let existing = TaskRepo::find_by_id(&state.pool, id).await?;
    auth.authorize(existing, ENTITY, id)?;

    let fields = input.into_fields()?;
    ensure_category_owned(&state.pool, auth.user_id, fields.category_id).await?;

    let task = TaskRepo::update(&state.pool, auth.user_id, id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(task_id = id, user_id = auth.user_id, status = %task.status, "Task updated");

    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete_task(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = TaskRepo::find_by_id(&state.pool, id).await?;
    auth.authorize(existing, ENTITY, id)?;

    if !TaskRepo::delete(&state.pool, auth.user_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }

    tracing::info!(task_id = id, user_id = auth.user_id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// A task may only reference an existing category of the same user.
async fn ensure_category_owned(
    pool: &DbPool,
    user_id: DbId,
    category_id: Option<DbId>,
) -> AppResult<()> {
    let Some(category_id) = category_id else {
        return Ok(());
    };
    if CategoryRepo::find_owned(pool, user_id, category_id)
        .await?
        .is_none()
    {
        return Err(CoreError::invalid_field(
            "category_id",
            "exists",
            "The selected category is invalid",
        )
        .into());
    }
    Ok(())
}
