//! Category entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tasktrack_core::category::MAX_NAME_LEN;
use tasktrack_core::error::CoreError;
use tasktrack_core::ownership::Owned;
use tasktrack_core::text::trim_to_none;
use tasktrack_core::types::{DbId, Timestamp};
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Owned for Category {
    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

/// A category with the number of tasks currently assigned to it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryWithTaskCount {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub color: String,
    pub tasks_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for creating or fully updating a category.
///
/// Fields are optional at the serde level so that a missing field is
/// reported as a field-level `required` error instead of a parse failure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(
        required(message = "The name field is required"),
        length(
            min = 1,
            max = MAX_NAME_LEN,
            message = "The name must be between 1 and 255 characters"
        ),
        custom(function = "tasktrack_core::text::validate_no_nul")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "The color field is required"),
        custom(function = "tasktrack_core::category::validate_hex_color")
    )]
    pub color: Option<String>,
}

/// Validated category attributes, ready to bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: String,
    pub color: String,
}

impl CategoryInput {
    /// Trim both fields, then validate and extract the field set. A blank
    /// name or color counts as missing.
    pub fn into_fields(self) -> Result<CategoryFields, CoreError> {
        let input = Self {
            name: trim_to_none(self.name),
            color: trim_to_none(self.color),
        };
        input.validate()?;
        Ok(CategoryFields {
            name: input.name.unwrap_or_default(),
            color: input.color.unwrap_or_default(),
        })
    }
}
