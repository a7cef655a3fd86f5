//! Task vocabulary and the composable task filter.
//!
//! [`build_filter_set`] folds the optional list parameters (`status`,
//! `priority`, `category`, `search`) into one [`TaskFilter`]. The repository
//! layer renders the filter's [`Predicate`]s to SQL; [`TaskFilter::matches`]
//! evaluates the same predicates in memory.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::ValidationError;

use crate::error::{field_error, CoreError};
use crate::text::has_nul;
use crate::types::DbId;

/// Maximum length of a task title, in characters.
pub const MAX_TITLE_LEN: u64 = 255;

/// Wire format of `due_date`.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of tasks shown in the dashboard's recent-activity feed.
pub const RECENT_TASKS_LIMIT: i64 = 5;

// ---------------------------------------------------------------------------
// Status / priority
// ---------------------------------------------------------------------------

/// Task lifecycle status. Stored as its snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: pending, in_progress, completed"
                ))
            })
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority. Stored as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskPriority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid priority '{s}'. Must be one of: low, medium, high"
                ))
            })
    }
}

impl TryFrom<String> for TaskPriority {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field validator for `status`, usable from `#[validate(custom(...))]`.
pub fn validate_status(value: &str) -> Result<(), ValidationError> {
    value.parse::<TaskStatus>().map(|_| ()).map_err(|_| {
        field_error(
            "status",
            "The status must be one of: pending, in_progress, completed",
        )
    })
}

/// Field validator for `priority`, usable from `#[validate(custom(...))]`.
pub fn validate_priority(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<TaskPriority>()
        .map(|_| ())
        .map_err(|_| field_error("priority", "The priority must be one of: low, medium, high"))
}

/// Parse a `YYYY-MM-DD` due date. An empty string means "no due date".
pub fn parse_due_date(value: &str) -> Result<Option<NaiveDate>, CoreError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| CoreError::Validation(format!("Invalid due date '{value}'")))
}

/// Field validator for `due_date`, usable from `#[validate(custom(...))]`.
pub fn validate_due_date(value: &str) -> Result<(), ValidationError> {
    parse_due_date(value)
        .map(|_| ())
        .map_err(|_| field_error("date", "The due date must be a date in YYYY-MM-DD format"))
}

// ---------------------------------------------------------------------------
// Filter set
// ---------------------------------------------------------------------------

/// Raw, borrowed list parameters as they arrive on the query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterParams<'a> {
    pub status: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub category: Option<&'a str>,
    pub search: Option<&'a str>,
}

/// One conjunct of a [`TaskFilter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Status(TaskStatus),
    Priority(TaskPriority),
    Category(DbId),
    /// Case-insensitive substring of the title OR the description.
    Search(String),
}

/// The fields of a task that a [`Predicate`] can inspect.
pub trait Filterable {
    fn status(&self) -> TaskStatus;
    fn priority(&self) -> TaskPriority;
    fn category_id(&self) -> Option<DbId>;
    fn title(&self) -> &str;
    fn description(&self) -> Option<&str>;
}

impl Predicate {
    pub fn matches<T: Filterable>(&self, task: &T) -> bool {
        match self {
            Predicate::Status(status) => task.status() == *status,
            Predicate::Priority(priority) => task.priority() == *priority,
            Predicate::Category(id) => task.category_id() == Some(*id),
            Predicate::Search(term) => {
                let needle = term.to_lowercase();
                task.title().to_lowercase().contains(&needle)
                    || task
                        .description()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
        }
    }
}

/// A composed, validated filter over a user's tasks. The empty filter
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category_id: Option<DbId>,
    pub search: Option<String>,
}

impl TaskFilter {
    /// The active conjuncts, in a stable order.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(status) = self.status {
            predicates.push(Predicate::Status(status));
        }
        if let Some(priority) = self.priority {
            predicates.push(Predicate::Priority(priority));
        }
        if let Some(id) = self.category_id {
            predicates.push(Predicate::Category(id));
        }
        if let Some(term) = &self.search {
            predicates.push(Predicate::Search(term.clone()));
        }
        predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    pub fn matches<T: Filterable>(&self, task: &T) -> bool {
        self.predicates().iter().all(|p| p.matches(task))
    }
}

/// Fold raw list parameters into a [`TaskFilter`].
///
/// Values are trimmed; absent or blank parameters impose no constraint. A
/// value that is not a valid status, priority or category id, or a search
/// term containing NUL, is rejected with a field-level error naming the
/// offending parameter.
pub fn build_filter_set(params: FilterParams<'_>) -> Result<TaskFilter, CoreError> {
    let status = match non_empty(params.status) {
        Some(raw) => Some(raw.parse::<TaskStatus>().map_err(|_| {
            CoreError::invalid_field(
                "status",
                "status",
                "The status filter must be one of: pending, in_progress, completed",
            )
        })?),
        None => None,
    };

    let priority = match non_empty(params.priority) {
        Some(raw) => Some(raw.parse::<TaskPriority>().map_err(|_| {
            CoreError::invalid_field(
                "priority",
                "priority",
                "The priority filter must be one of: low, medium, high",
            )
        })?),
        None => None,
    };

    let category_id = match non_empty(params.category) {
        Some(raw) => Some(raw.parse::<DbId>().map_err(|_| {
            CoreError::invalid_field(
                "category",
                "category",
                "The category filter must be a category id",
            )
        })?),
        None => None,
    };

    let search = match non_empty(params.search) {
        Some(term) if has_nul(term) => {
            return Err(CoreError::invalid_field(
                "search",
                "no_nul",
                "The search text must not contain NUL characters",
            ))
        }
        Some(term) => Some(term.to_string()),
        None => None,
    };

    Ok(TaskFilter {
        status,
        priority,
        category_id,
        search,
    })
}

/// Trimmed value, or `None` when absent or blank.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Build an `ILIKE` pattern matching `term` as a literal substring.
///
/// Escapes the LIKE metacharacters `\`, `%` and `_` (PostgreSQL's default
/// escape character is `\`).
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
