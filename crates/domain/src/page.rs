//! Page cursor: the position of a view within a paginated result.

use std::num::NonZeroU32;

use serde::Serialize;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(50) {
    Some(size) => size,
    None => unreachable!(),
};

/// Current page, fixed page size and last known page count.
///
/// Invariant: `1 <= current_page <= total_pages` once a server total has
/// been applied; `total_pages` is at least 1 at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCursor {
    current_page: u32,
    page_size: NonZeroU32,
    total_pages: u32,
}

impl PageCursor {
    /// A cursor on page 1 of 1.
    #[must_use]
    pub fn first(page_size: NonZeroU32) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_pages: 1,
        }
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size.get()
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether a following page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether a preceding page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Return to page 1.
    pub fn rewind(&mut self) {
        self.current_page = 1;
    }

    /// Move forward one page if one exists. Returns whether the page changed.
    pub fn step_forward(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Move back one page if one exists. Returns whether the page changed.
    pub fn step_back(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Record the server's page count, clamping the current page into range.
    pub fn apply_total(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        self.current_page = self.current_page.clamp(1, self.total_pages);
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(current: u32, total: u32) -> PageCursor {
        let mut cursor = PageCursor::default();
        cursor.apply_total(total);
        while cursor.current_page() < current && cursor.step_forward() {}
        cursor
    }

    #[test]
    fn should_start_on_page_one_of_one() {
        let cursor = PageCursor::default();
        assert_eq!(cursor.current_page(), 1);
        assert_eq!(cursor.total_pages(), 1);
        assert_eq!(cursor.page_size(), 50);
        assert!(!cursor.has_next());
        assert!(!cursor.has_previous());
    }

    #[test]
    fn should_not_step_past_last_page() {
        let mut cursor = cursor(3, 3);
        assert!(!cursor.step_forward());
        assert_eq!(cursor.current_page(), 3);
    }

    #[test]
    fn should_not_step_before_first_page() {
        let mut cursor = cursor(1, 3);
        assert!(!cursor.step_back());
        assert_eq!(cursor.current_page(), 1);
    }

    #[test]
    fn should_clamp_current_page_when_total_shrinks() {
        let mut cursor = cursor(5, 8);
        cursor.apply_total(2);
        assert_eq!(cursor.current_page(), 2);
        assert_eq!(cursor.total_pages(), 2);
    }

    #[test]
    fn should_treat_zero_total_as_one_page() {
        let mut cursor = cursor(1, 4);
        cursor.apply_total(0);
        assert_eq!(cursor.total_pages(), 1);
        assert_eq!(cursor.current_page(), 1);
    }

    #[test]
    fn should_serialize_camel_case() {
        let json = serde_json::to_value(PageCursor::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"currentPage": 1, "pageSize": 50, "totalPages": 1})
        );
    }
}
