//! Shared response envelope types for API handlers.
//!
//! Single records and plain lists use a `{ "data": ... }` envelope. The task
//! listing serializes [`TaskPage`](tasktrack_db::models::task::TaskPage)
//! directly, which adds `"meta"` alongside `"data"`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: categories }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
