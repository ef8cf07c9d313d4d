//! Fixed-size page slicing for guestbook listings.
//!
//! Listings are filtered in memory and then cut into pages of a fixed size.
//! Page numbers are 1-indexed and always clamped into
//! `[1, max(page_count, 1)]`, so a stale page number never produces an empty
//! page while records exist.
//!
//! ```
//! use pagination::{PageSize, Pager};
//!
//! let pager = Pager::new(25, PageSize::default(), 3);
//! assert_eq!(pager.page_count(), 3);
//! assert_eq!(pager.range(), 20..25);
//! assert!(!pager.has_next());
//! ```

use std::num::NonZeroUsize;
use std::ops::Range;

use serde::Serialize;
use thiserror::Error;

/// Number of records shown per dashboard page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Errors raised while building pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page sizes must be strictly positive.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Strictly positive number of items per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Validate and wrap a page size.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageSize`] when `size` is zero.
    pub fn new(size: usize) -> Result<Self, PaginationError> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or(PaginationError::ZeroPageSize)
    }

    /// Raw page size.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(DEFAULT_PAGE_SIZE - 1))
    }
}

/// Number of pages needed for `total` items; zero when there are no items.
#[must_use]
pub const fn page_count(total: usize, size: PageSize) -> usize {
    total.div_ceil(size.get())
}

/// Clamp a requested 1-indexed page into `[1, max(page_count, 1)]`.
#[must_use]
pub fn clamp_page(requested: usize, page_count: usize) -> usize {
    requested.clamp(1, page_count.max(1))
}

/// Pagination cursor over a list of known length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    total: usize,
    size: PageSize,
    current: usize,
}

impl Pager {
    /// Build a pager, clamping `requested_page` into the valid range.
    #[must_use]
    pub fn new(total: usize, size: PageSize, requested_page: usize) -> Self {
        let current = clamp_page(requested_page, page_count(total, size));
        Self {
            total,
            size,
            current,
        }
    }

    /// Total number of items being paged.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.size
    }

    /// Current 1-indexed page after clamping.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current
    }

    /// Number of pages; zero for an empty list.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        page_count(self.total, self.size)
    }

    /// Whether the "previous" control is enabled.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current > 1
    }

    /// Whether the "next" control is enabled.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current < self.page_count()
    }

    /// Index range of the current page within the paged list.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = self
            .current
            .saturating_sub(1)
            .saturating_mul(self.size.get())
            .min(self.total);
        let end = start.saturating_add(self.size.get()).min(self.total);
        start..end
    }

    /// Borrow the current page out of `items`.
    ///
    /// `items` is expected to be the list the pager was built for; a shorter
    /// slice yields an empty page rather than panicking.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(self.range()).unwrap_or_default()
    }

    /// Pager moved to the next page, saturating at the last page.
    #[must_use]
    pub fn next(self) -> Self {
        Self::new(self.total, self.size, self.current.saturating_add(1))
    }

    /// Pager moved to the previous page, saturating at the first page.
    #[must_use]
    pub fn previous(self) -> Self {
        Self::new(self.total, self.size, self.current.saturating_sub(1))
    }
}

/// Serialisable page of items plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on the current page.
    pub items: Vec<T>,
    /// Current 1-indexed page.
    pub page: usize,
    /// Items per page.
    pub page_size: usize,
    /// Number of pages; zero when `total` is zero.
    pub page_count: usize,
    /// Number of items across all pages.
    pub total: usize,
    /// Whether a previous page exists.
    pub has_previous: bool,
    /// Whether a next page exists.
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Map page items while keeping navigation metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            page_count: self.page_count,
            total: self.total,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }
}

/// Cut the requested page out of `items`, cloning the visible slice.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], size: PageSize, requested_page: usize) -> Page<T> {
    let pager = Pager::new(items.len(), size, requested_page);
    Page {
        items: pager.slice(items).to_vec(),
        page: pager.current_page(),
        page_size: size.get(),
        page_count: pager.page_count(),
        total: pager.total(),
        has_previous: pager.has_previous(),
        has_next: pager.has_next(),
    }
}

#[cfg(test)]
mod tests {
    //! Page arithmetic and partition coverage.

    use super::*;
    use rstest::rstest;

    fn size(n: usize) -> PageSize {
        PageSize::new(n).unwrap_or_default()
    }

    #[rstest]
    fn default_page_size_is_ten() {
        assert_eq!(PageSize::default().get(), DEFAULT_PAGE_SIZE);
    }

    #[rstest]
    fn zero_page_size_is_rejected() {
        assert_eq!(PageSize::new(0), Err(PaginationError::ZeroPageSize));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(10, 1)]
    #[case(11, 2)]
    #[case(25, 3)]
    fn page_count_rounds_up(#[case] total: usize, #[case] expected: usize) {
        assert_eq!(page_count(total, size(10)), expected);
    }

    #[rstest]
    #[case(0, 3, 1)]
    #[case(7, 3, 3)]
    #[case(2, 0, 1)]
    #[case(2, 3, 2)]
    fn clamps_requested_page(#[case] requested: usize, #[case] pages: usize, #[case] expected: usize) {
        assert_eq!(clamp_page(requested, pages), expected);
    }

    #[rstest]
    fn empty_list_disables_both_controls() {
        let pager = Pager::new(0, size(10), 4);
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.page_count(), 0);
        assert!(!pager.has_previous());
        assert!(!pager.has_next());
        assert!(pager.range().is_empty());
    }

    #[rstest]
    fn navigation_saturates_at_bounds() {
        let pager = Pager::new(25, size(10), 1);
        assert!(!pager.has_previous());
        assert!(pager.has_next());

        let last = pager.next().next().next();
        assert_eq!(last.current_page(), 3);
        assert!(!last.has_next());
        assert!(last.has_previous());
        assert_eq!(last.previous().current_page(), 2);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(9)]
    #[case(10)]
    #[case(23)]
    #[case(40)]
    fn pages_partition_the_list(#[case] total: usize) {
        let items: Vec<usize> = (0..total).collect();
        let page_size = size(10);
        let pages = page_count(total, page_size);

        let mut seen = Vec::new();
        for page in 1..=pages {
            let slice = Pager::new(total, page_size, page).slice(&items);
            assert!(!slice.is_empty());
            seen.extend_from_slice(slice);
        }

        assert_eq!(seen, items);
    }

    #[rstest]
    fn paginate_reports_metadata() {
        let items: Vec<u32> = (1..=23).collect();
        let page = paginate(&items, size(10), 3);

        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.page, 3);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.total, 23);
        assert!(page.has_previous);
        assert!(!page.has_next);
    }

    #[rstest]
    fn slice_tolerates_shorter_input() {
        let pager = Pager::new(30, size(10), 3);
        let short = [1, 2, 3];
        assert!(pager.slice(&short).is_empty());
    }
}
