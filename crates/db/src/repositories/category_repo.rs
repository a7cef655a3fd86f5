//! Repository for the `categories` table.

use sqlx::PgPool;
use tasktrack_core::types::DbId;

use crate::models::category::{Category, CategoryFields, CategoryWithTaskCount};

/// Column list shared across queries.
const COLUMNS: &str = "id, user_id, name, color, created_at, updated_at";

/// Provides CRUD operations for a user's categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CategoryFields,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (user_id, name, color) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a category by ID regardless of owner.
    ///
    /// Used to tell "does not exist" apart from "belongs to someone else"
    /// before an ownership check.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by ID only if it belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's categories, newest first, each with its task count.
    pub async fn list_with_task_counts(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CategoryWithTaskCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithTaskCount>(
            "SELECT c.id, c.user_id, c.name, c.color, \
                    COUNT(t.id) AS tasks_count, \
                    c.created_at, c.updated_at \
             FROM categories c \
             LEFT JOIN tasks t ON t.category_id = c.id \
             WHERE c.user_id = $1 \
             GROUP BY c.id \
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Replace a category's name and color.
    ///
    /// Returns `None` if no category with `id` is owned by `user_id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &CategoryFields,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                 name = $3, \
                 color = $4, \
                 updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category owned by `user_id`. Its tasks keep existing with
    /// `category_id` set to NULL (`ON DELETE SET NULL`).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
