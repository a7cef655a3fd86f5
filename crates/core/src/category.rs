//! Category constants and validation helpers.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

use crate::error::field_error;

/// Maximum length of a category name, in characters.
pub const MAX_NAME_LEN: u64 = 255;

/// `#RGB` or `#RRGGBB`, hex digits in either case.
const HEX_COLOR_PATTERN: &str = r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$";

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEX_COLOR_PATTERN).expect("valid regex"));

/// Whether `color` is a `#RGB` or `#RRGGBB` hex color.
pub fn is_hex_color(color: &str) -> bool {
    HEX_COLOR_RE.is_match(color)
}

/// Field validator for category colors, usable from `#[validate(custom(...))]`.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if is_hex_color(color) {
        Ok(())
    } else {
        Err(field_error(
            "hex_color",
            "The color must be a hex color such as #3366ff or #fff",
        ))
    }
}
