//! This modules defines the common functionality for paging data.

use std::ops::Range;

/// The number of rows shown on each page of a table.
pub const ROWS_PER_PAGE: usize = 10;

/// Tracks which page of a list of rows is being displayed.
///
/// Pages are numbered from 1. A list with no rows has zero pages, but is
/// still displayed as a single empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    total_pages: usize,
}

impl Pagination {
    /// Paginate `row_count` rows, starting on the first page.
    pub fn new(row_count: usize) -> Self {
        Self {
            current_page: 1,
            total_pages: row_count.div_ceil(ROWS_PER_PAGE),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(row_count / ROWS_PER_PAGE)`, which is zero for an empty list.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// The number of pages to show in the pagination controls.
    pub fn page_count(&self) -> usize {
        self.total_pages.max(1)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Move to the next page. Returns `false` and does nothing on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }

        self.current_page += 1;
        true
    }

    /// Move to the previous page. Returns `false` and does nothing on the first page.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }

        self.current_page -= 1;
        true
    }

    /// The indices of the rows on the current page for a list of `row_count` rows.
    pub fn row_range(&self, row_count: usize) -> Range<usize> {
        let start = ((self.current_page - 1) * ROWS_PER_PAGE).min(row_count);
        let end = (start + ROWS_PER_PAGE).min(row_count);

        start..end
    }
}

#[cfg(test)]
mod tests {
    use crate::pagination::{Pagination, ROWS_PER_PAGE};

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(0).total_pages(), 0);
        assert_eq!(Pagination::new(1).total_pages(), 1);
        assert_eq!(Pagination::new(ROWS_PER_PAGE).total_pages(), 1);
        assert_eq!(Pagination::new(ROWS_PER_PAGE + 1).total_pages(), 2);
        assert_eq!(Pagination::new(25).total_pages(), 3);
    }

    #[test]
    fn empty_list_is_shown_as_one_page() {
        let pagination = Pagination::new(0);

        assert_eq!(pagination.current_page(), 1);
        assert_eq!(pagination.page_count(), 1);
        assert!(!pagination.has_next());
        assert!(!pagination.has_previous());
    }

    #[test]
    fn next_stops_at_last_page() {
        let mut pagination = Pagination::new(25);

        assert!(pagination.next());
        assert!(pagination.next());
        assert_eq!(pagination.current_page(), 3);

        assert!(!pagination.next());
        assert_eq!(pagination.current_page(), 3);
    }

    #[test]
    fn previous_stops_at_first_page() {
        let mut pagination = Pagination::new(25);

        assert!(!pagination.previous());
        assert_eq!(pagination.current_page(), 1);

        pagination.next();
        assert!(pagination.previous());
        assert_eq!(pagination.current_page(), 1);
    }

    #[test]
    fn next_does_nothing_without_rows() {
        let mut pagination = Pagination::new(0);

        assert!(!pagination.next());
        assert_eq!(pagination.current_page(), 1);
    }

    #[test]
    fn row_range_covers_partial_last_page() {
        let mut pagination = Pagination::new(25);
        assert_eq!(pagination.row_range(25), 0..10);

        pagination.next();
        pagination.next();
        assert_eq!(pagination.row_range(25), 20..25);
    }

    #[test]
    fn row_range_is_empty_without_rows() {
        assert_eq!(Pagination::new(0).row_range(0), 0..0);
    }
}
