//! Client-side pagination over an already filtered record list.

use serde::{Deserialize, Serialize};

/// Page sizes a pager offers.
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 20, 50, 100];

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A 1-based page cursor.
///
/// A page size of zero is treated as one.
///
/// ```
/// use gridscope_seeker::Pagination;
///
/// let items: Vec<u32> = (1..=12).collect();
/// let mut pager = Pagination::new(5);
/// assert_eq!(pager.page_count(items.len()), 3);
///
/// pager.set_page(3);
/// assert_eq!(pager.slice(&items), &[11, 12]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page_size: usize,
    pub current: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Starts at page 1.
    pub fn new(page_size: usize) -> Self {
        Pagination {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    /// Number of pages needed for `total` items.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1))
    }

    /// Moves to `page`; page 0 becomes page 1.
    pub fn set_page(&mut self, page: usize) {
        self.current = page.max(1);
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current = 1;
    }

    /// Index range of the current page, clamped to `total`.
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let size = self.page_size.max(1);
        let start = self
            .current
            .saturating_sub(1)
            .saturating_mul(size)
            .min(total);
        let end = start.saturating_add(size).min(total);
        start..end
    }

    /// The items of the current page; empty past the last page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}
