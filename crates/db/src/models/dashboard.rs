//! Dashboard aggregate models.

use serde::Serialize;
use sqlx::FromRow;

use crate::models::task::TaskWithCategory;

/// Per-status task counts for one user.
///
/// Every task has exactly one status, so
/// `pending + in_progress + completed == total` for consistent data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct TaskStats {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
}

/// Payload of the dashboard: summary counts plus the recent-activity feed.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub stats: TaskStats,
    pub recent_tasks: Vec<TaskWithCategory>,
}
