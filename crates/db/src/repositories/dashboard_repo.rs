//! Per-user dashboard aggregation: status counts and recent activity.

use sqlx::PgPool;
use tasktrack_core::task::{TaskStatus, RECENT_TASKS_LIMIT};
use tasktrack_core::types::DbId;

use crate::models::dashboard::{DashboardSummary, TaskStats};
use crate::models::task::{TaskWithCategory, TaskWithCategoryRow};
use crate::repositories::task_repo::{JOINED_COLUMNS, JOINED_FROM};

/// Provides read-only dashboard queries.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Count a user's tasks, overall and per status, in one pass.
    ///
    /// `pending + in_progress + completed == total` holds because the status
    /// column is constrained to exactly those three values.
    pub async fn compute_stats(pool: &PgPool, user_id: DbId) -> Result<TaskStats, sqlx::Error> {
        sqlx::query_as::<_, TaskStats>(
            "SELECT \
                 COUNT(*) AS total, \
                 COUNT(*) FILTER (WHERE status = $2) AS pending, \
                 COUNT(*) FILTER (WHERE status = $3) AS in_progress, \
                 COUNT(*) FILTER (WHERE status = $4) AS completed \
             FROM tasks \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(TaskStatus::Pending.as_str())
        .bind(TaskStatus::InProgress.as_str())
        .bind(TaskStatus::Completed.as_str())
        .fetch_one(pool)
        .await
    }

    /// The user's `limit` most recently created tasks, with categories.
    pub async fn recent_tasks(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<TaskWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} {JOINED_FROM} \
             WHERE t.user_id = $1 \
             ORDER BY t.created_at DESC, t.id DESC \
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, TaskWithCategoryRow>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(TaskWithCategory::from).collect())
    }

    /// Stats plus the recent-activity feed for the dashboard page.
    pub async fn summary(pool: &PgPool, user_id: DbId) -> Result<DashboardSummary, sqlx::Error> {
        let stats = Self::compute_stats(pool, user_id).await?;
        let recent_tasks = Self::recent_tasks(pool, user_id, RECENT_TASKS_LIMIT).await?;
        Ok(DashboardSummary {
            stats,
            recent_tasks,
        })
    }
}
