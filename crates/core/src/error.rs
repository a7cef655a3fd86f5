use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Per-field validation failures, reported back to the caller as-is.
    #[error("Validation failed: {0}")]
    InvalidFields(ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    /// Build an [`CoreError::InvalidFields`] carrying a single field error.
    pub fn invalid_field(field: &'static str, code: &'static str, message: &str) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, field_error(code, message));
        CoreError::InvalidFields(errors)
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::InvalidFields(errors)
    }
}

/// Build a [`ValidationError`] with a human-readable message attached.
pub fn field_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message.to_string()));
    error
}
