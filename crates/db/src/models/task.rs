//! Task entity model, list parameters, and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasktrack_core::error::CoreError;
use tasktrack_core::ownership::Owned;
use tasktrack_core::pagination::{parse_page, PageMeta};
use tasktrack_core::task::{
    parse_due_date, FilterParams, Filterable, TaskPriority, TaskStatus, MAX_TITLE_LEN,
};
use tasktrack_core::text::trim_to_none;
use tasktrack_core::types::{DbId, Timestamp};
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    #[sqlx(try_from = "String")]
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Task {
    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

impl Filterable for Task {
    fn status(&self) -> TaskStatus {
        self.status
    }
    fn priority(&self) -> TaskPriority {
        self.priority
    }
    fn category_id(&self) -> Option<DbId> {
        self.category_id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// The display fields of a task's category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

/// A task row joined with its category (`LEFT JOIN categories`).
#[derive(Debug, Clone, FromRow)]
pub struct TaskWithCategoryRow {
    #[sqlx(flatten)]
    pub task: Task,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
}

/// A task with its category resolved for display.
#[derive(Debug, Clone, Serialize)]
pub struct TaskWithCategory {
    #[serde(flatten)]
    pub task: Task,
    pub category: Option<CategorySummary>,
}

impl From<TaskWithCategoryRow> for TaskWithCategory {
    fn from(row: TaskWithCategoryRow) -> Self {
        let category = match (row.task.category_id, row.category_name, row.category_color) {
            (Some(id), Some(name), Some(color)) => Some(CategorySummary { id, name, color }),
            _ => None,
        };
        Self {
            task: row.task,
            category,
        }
    }
}

/// One page of a filtered task listing.
#[derive(Debug, Clone, Serialize)]
pub struct TaskPage {
    pub data: Vec<TaskWithCategory>,
    pub meta: PageMeta,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/v1/tasks`.
///
/// Values stay raw strings so that empty form fields (`?status=`) mean
/// "no filter" and malformed values surface as field errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
}

impl TaskListParams {
    pub fn filter_params(&self) -> FilterParams<'_> {
        FilterParams {
            status: self.status.as_deref(),
            priority: self.priority.as_deref(),
            category: self.category.as_deref(),
            search: self.search.as_deref(),
        }
    }

    /// Requested page number, defaulting to 1.
    pub fn page(&self) -> i64 {
        parse_page(self.page.as_deref())
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for creating or fully updating a task.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(
        required(message = "The title field is required"),
        length(
            min = 1,
            max = MAX_TITLE_LEN,
            message = "The title must be between 1 and 255 characters"
        ),
        custom(function = "tasktrack_core::text::validate_no_nul")
    )]
    pub title: Option<String>,
    #[validate(custom(function = "tasktrack_core::text::validate_no_nul"))]
    pub description: Option<String>,
    #[validate(
        required(message = "The status field is required"),
        custom(function = "tasktrack_core::task::validate_status")
    )]
    pub status: Option<String>,
    #[validate(
        required(message = "The priority field is required"),
        custom(function = "tasktrack_core::task::validate_priority")
    )]
    pub priority: Option<String>,
    #[validate(custom(function = "tasktrack_core::task::validate_due_date"))]
    pub due_date: Option<String>,
    pub category_id: Option<DbId>,
}

/// Validated task attributes, ready to bind.
///
/// `category_id` has only been shape-checked here; ownership of the
/// referenced category is verified against the database by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub category_id: Option<DbId>,
}

impl TaskInput {
    /// Trim every string, then validate the payload and extract the typed
    /// field set.
    ///
    /// Blank strings count as absent: a blank `title` fails `required`, and a
    /// blank `description` or `due_date` is stored as NULL.
    pub fn into_fields(self) -> Result<TaskFields, CoreError> {
        let input = self.normalized();
        input.validate()?;
        input.into_valid_fields()
    }

    fn normalized(self) -> Self {
        Self {
            title: trim_to_none(self.title),
            description: trim_to_none(self.description),
            status: trim_to_none(self.status),
            priority: trim_to_none(self.priority),
            due_date: trim_to_none(self.due_date),
            category_id: self.category_id,
        }
    }

    fn into_valid_fields(self) -> Result<TaskFields, CoreError> {
        let status = self.status.as_deref().unwrap_or_default().parse()?;
        let priority = self.priority.as_deref().unwrap_or_default().parse()?;
        let due_date = match self.due_date.as_deref() {
            Some(raw) => parse_due_date(raw)?,
            None => None,
        };

        Ok(TaskFields {
            title: self.title.unwrap_or_default(),
            description: self.description,
            status,
            priority,
            due_date,
            category_id: self.category_id,
        })
    }
}
