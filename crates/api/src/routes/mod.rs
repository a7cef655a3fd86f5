pub mod categories;
pub mod dashboard;
pub mod health;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dashboard                       stats + recent tasks
///
/// /tasks                           list (filtered, paginated), create
///     /{id}                        get, update, delete
///
/// /categories                      list (with task counts), create
///     /{id}                        get, update, delete
/// ```
///
/// Every route requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/dashboard", dashboard::router())
        .nest("/tasks", tasks::router())
        .nest("/categories", categories::router())
}
