//! Page navigation bounded by the server-reported page count.

use std::num::NonZeroU32;

use batlog_domain::page::PageCursor;

/// Owns the [`PageCursor`] of a view.
///
/// Navigation outside `[1, total_pages]` is a no-op, never an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationController {
    cursor: PageCursor,
}

impl PaginationController {
    #[must_use]
    pub fn new(page_size: NonZeroU32) -> Self {
        Self {
            cursor: PageCursor::first(page_size),
        }
    }

    /// Go back to page 1. The known page count is kept.
    pub fn reset(&mut self) {
        self.cursor.rewind();
    }

    /// Advance one page. Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        self.cursor.step_forward()
    }

    /// Go back one page. Returns whether the page changed.
    pub fn previous(&mut self) -> bool {
        self.cursor.step_back()
    }

    /// Record the page count reported by the server.
    pub fn apply_server_total(&mut self, total_pages: u32) {
        self.cursor.apply_total(total_pages);
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.cursor.has_next()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.cursor.has_previous()
    }

    #[must_use]
    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page(current: u32, total: u32) -> PaginationController {
        let mut pagination = PaginationController::default();
        pagination.apply_server_total(total);
        for _ in 1..current {
            assert!(pagination.next());
        }
        pagination
    }

    #[test]
    fn should_not_move_past_last_page() {
        let mut pagination = on_page(3, 3);
        let before = pagination.cursor();

        assert!(!pagination.next());
        assert_eq!(pagination.cursor(), before);
    }

    #[test]
    fn should_not_move_before_first_page() {
        let mut pagination = on_page(1, 3);
        assert!(!pagination.previous());
        assert_eq!(pagination.cursor().current_page(), 1);
    }

    #[test]
    fn should_clamp_when_server_reports_fewer_pages() {
        let mut pagination = on_page(5, 8);
        pagination.apply_server_total(2);
        assert_eq!(pagination.cursor().current_page(), 2);
        assert!(!pagination.can_go_next());
        assert!(pagination.can_go_previous());
    }

    #[test]
    fn should_reset_to_first_page_and_keep_total() {
        let mut pagination = on_page(4, 6);
        pagination.reset();
        assert_eq!(pagination.cursor().current_page(), 1);
        assert_eq!(pagination.cursor().total_pages(), 6);
    }

    #[test]
    fn should_disable_both_directions_on_single_page() {
        let pagination = on_page(1, 1);
        assert!(!pagination.can_go_next());
        assert!(!pagination.can_go_previous());
    }

    #[test]
    fn should_use_configured_page_size() {
        let pagination = PaginationController::new(NonZeroU32::new(20).unwrap());
        assert_eq!(pagination.cursor().page_size(), 20);
    }
}
