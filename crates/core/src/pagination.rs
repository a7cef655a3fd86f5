//! Page-number pagination helpers.

use serde::Serialize;

/// Fixed page size for task listings.
pub const TASKS_PER_PAGE: i64 = 10;

/// Parse a raw `?page=` value. Missing, malformed or non-positive values
/// fall back to the first page.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// Row offset of the first item on `page` (1-based).
pub fn page_offset(page: i64, per_page: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(per_page)
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub per_page: i64,
    /// Total number of matching rows across all pages.
    pub total: i64,
    /// Last page that contains rows; `1` when there are none.
    pub last_page: i64,
}

impl PageMeta {
    pub fn new(current_page: i64, per_page: i64, total: i64) -> Self {
        let last_page = if total <= 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            current_page,
            per_page,
            total,
            last_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
    }

    #[test]
    fn page_passes_through_valid_value() {
        assert_eq!(parse_page(Some("4")), 4);
        assert_eq!(parse_page(Some(" 2 ")), 2);
    }

    #[test]
    fn offset_for_first_and_later_pages() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 10), 20);
    }

    #[test]
    fn offset_saturates_for_huge_pages() {
        assert_eq!(page_offset(i64::MAX, 10), i64::MAX);
    }

    #[test]
    fn last_page_rounds_up() {
        assert_eq!(PageMeta::new(1, 10, 21).last_page, 3);
        assert_eq!(PageMeta::new(1, 10, 20).last_page, 2);
        assert_eq!(PageMeta::new(1, 10, 1).last_page, 1);
    }

    #[test]
    fn empty_result_has_one_page() {
        let meta = PageMeta::new(5, 10, 0);
        assert_eq!(meta.last_page, 1);
        assert_eq!(meta.current_page, 5);
    }
}
