//! Repository for the `tasks` table.
//!
//! Listing queries are assembled with [`QueryBuilder`]: one `WHERE` clause is
//! rendered from the [`TaskFilter`]'s predicates and shared by the page query
//! and the count query, so `meta.total` always agrees with the rows returned.

use sqlx::{PgPool, Postgres, QueryBuilder};
use tasktrack_core::pagination::{page_offset, PageMeta, TASKS_PER_PAGE};
use tasktrack_core::task::{like_pattern, Predicate, TaskFilter};
use tasktrack_core::types::DbId;

use crate::models::task::{Task, TaskFields, TaskPage, TaskWithCategory, TaskWithCategoryRow};

/// Column list shared across single-table queries.
const COLUMNS: &str = "id, user_id, category_id, title, description, status, priority, \
                       due_date, created_at, updated_at";

/// Task columns plus the display fields of the joined category.
pub(crate) const JOINED_COLUMNS: &str = "t.id, t.user_id, t.category_id, t.title, \
     t.description, t.status, t.priority, t.due_date, t.created_at, t.updated_at, \
     c.name AS category_name, c.color AS category_color";

/// `FROM` clause joining each task to its category, if it has one.
pub(crate) const JOINED_FROM: &str =
    "FROM tasks t LEFT JOIN categories c ON c.id = t.category_id AND c.user_id = t.user_id";

/// Provides CRUD and filtered listing for a user's tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &TaskFields,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks \
                 (user_id, category_id, title, description, status, priority, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.priority.as_str())
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID regardless of owner.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find one of `user_id`'s tasks with its category resolved.
    pub async fn find_with_category(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<TaskWithCategory>, sqlx::Error> {
        let query =
            format!("SELECT {JOINED_COLUMNS} {JOINED_FROM} WHERE t.id = $1 AND t.user_id = $2");
        let row = sqlx::query_as::<_, TaskWithCategoryRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(TaskWithCategory::from))
    }

    /// Replace every editable attribute of a task. Last write wins.
    ///
    /// Returns `None` if no task with `id` is owned by `user_id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &TaskFields,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET \
                 category_id = $3, \
                 title = $4, \
                 description = $5, \
                 status = $6, \
                 priority = $7, \
                 due_date = $8, \
                 updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_str())
            .bind(input.priority.as_str())
            .bind(input.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task owned by `user_id`. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of `user_id`'s tasks matching every predicate in `filter`,
    /// newest first.
    ///
    /// Pages past the end come back empty with accurate `meta`.
    pub async fn list_filtered(
        pool: &PgPool,
        user_id: DbId,
        filter: &TaskFilter,
        page: i64,
    ) -> Result<TaskPage, sqlx::Error> {
        let mut count_query: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM tasks t");
        push_scope(&mut count_query, user_id, filter);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(pool)
            .await?;

        let mut list_query: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {JOINED_COLUMNS} {JOINED_FROM}"));
        push_scope(&mut list_query, user_id, filter);
        list_query
            .push(" ORDER BY t.created_at DESC, t.id DESC LIMIT ")
            .push_bind(TASKS_PER_PAGE)
            .push(" OFFSET ")
            .push_bind(page_offset(page, TASKS_PER_PAGE));

        let rows = list_query
            .build_query_as::<TaskWithCategoryRow>()
            .fetch_all(pool)
            .await?;

        Ok(TaskPage {
            data: rows.into_iter().map(TaskWithCategory::from).collect(),
            meta: PageMeta::new(page, TASKS_PER_PAGE, total),
        })
    }
}

/// Append `WHERE t.user_id = ? AND <predicate> ...` to `builder`.
fn push_scope(builder: &mut QueryBuilder<'_, Postgres>, user_id: DbId, filter: &TaskFilter) {
    builder.push(" WHERE t.user_id = ").push_bind(user_id);

    for predicate in filter.predicates() {
        match predicate {
            Predicate::Status(status) => {
                builder.push(" AND t.status = ").push_bind(status.as_str());
            }
            Predicate::Priority(priority) => {
                builder.push(" AND t.priority = ").push_bind(priority.as_str());
            }
            Predicate::Category(category_id) => {
                builder.push(" AND t.category_id = ").push_bind(category_id);
            }
            Predicate::Search(term) => {
                let pattern = like_pattern(&term);
                builder
                    .push(" AND (t.title ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR t.description ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        }
    }
}
