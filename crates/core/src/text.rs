//! Free-text input normalization.
//!
//! Incoming strings are trimmed and blank values collapse to `None` before
//! validation, so `"   "` fails a `required` rule the same way a missing
//! field does. PostgreSQL text columns cannot hold NUL, so it is rejected
//! up front as a field error.

use validator::ValidationError;

use crate::error::field_error;

/// Trim `value`; whitespace-only or empty strings become `None`.
pub fn trim_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == v.len() {
            Some(v)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Whether `value` contains a NUL character.
pub fn has_nul(value: &str) -> bool {
    value.contains('\0')
}

/// Field validator rejecting NUL characters, usable from `#[validate(custom(...))]`.
pub fn validate_no_nul(value: &str) -> Result<(), ValidationError> {
    if has_nul(value) {
        Err(field_error("no_nul", "The text must not contain NUL characters"))
    } else {
        Ok(())
    }
}
