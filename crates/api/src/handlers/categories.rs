//! Handlers for the `/categories` resource.
//!
//! Every endpoint is scoped to the authenticated user. Reads, updates and
//! deletes look the category up by id first so that a foreign id is
//! reported as `403 FORBIDDEN` and an unknown id as `404 NOT_FOUND`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tasktrack_core::error::CoreError;
use tasktrack_core::types::DbId;
use tasktrack_db::models::category::CategoryInput;
use tasktrack_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Category";

/// GET /api/v1/categories
///
/// The caller's categories, newest first, each with `tasks_count`.
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_with_task_counts(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/categories
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    let fields = input.into_fields()?;
    let category = CategoryRepo::create(&state.pool, auth.user_id, &fields).await?;

    tracing::info!(category_id = category.id, user_id = auth.user_id, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = CategoryRepo::find_by_id(&state.pool, id).await?;
    let category = auth.authorize(existing, ENTITY, id)?;

    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/categories/{id}
///
/// Replace name and color. Ownership is checked before the payload.
pub async fn update_category(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CategoryInput>,
) -> AppResult<impl IntoResponse> {
    let existing = CategoryRepo::find_by_id(&state.pool, id).await?;
    auth.authorize(existing, ENTITY, id)?;

    let fields = input.into_fields()?;
    let category = CategoryRepo::update(&state.pool, auth.user_id, id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(category_id = id, user_id = auth.user_id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Tasks in the category survive with no category.
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = CategoryRepo::find_by_id(&state.pool, id).await?;
    auth.authorize(existing, ENTITY, id)?;

    if !CategoryRepo::delete(&state.pool, auth.user_id, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }

    tracing::info!(category_id = id, user_id = auth.user_id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
