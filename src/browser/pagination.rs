//! Fixed-size pages over the filtered post list. Pages are 1-based and there is always at least
//! one page, even when nothing matches.
use std::ops::RangeInclusive;

pub const PAGE_SIZE: usize = 9;
/// Most page-number buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

pub fn total_pages(count: usize) -> usize {
    ((count + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
}

/// Half-open range of indices into the filtered list that make up `page`.
pub fn page_bounds(page: usize, count: usize) -> (usize, usize) {
    let start = ((page.max(1) - 1) * PAGE_SIZE).min(count);
    let end = (start + PAGE_SIZE).min(count);
    (start, end)
}

/// Page numbers to show as buttons: up to `PAGE_WINDOW` of them, centred on `current` and
/// shifted inwards near either end.
pub fn page_window(current: usize, total: usize) -> RangeInclusive<usize> {
    let total = total.max(1);
    let size = PAGE_WINDOW.min(total);
    let current = current.max(1).min(total);
    let start = current
        .saturating_sub(PAGE_WINDOW / 2)
        .max(1)
        .min(total - size + 1);
    start..=start + size - 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { current: 1 }
    }
}

impl Pagination {
    pub fn current(&self) -> usize {
        self.current
    }

    /// Move to `page`, clamped into `[1, total]`.
    pub fn go_to(&mut self, page: usize, total: usize) {
        self.current = page.max(1).min(total.max(1));
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Re-clamp after the filtered list changed size. A page past the new end becomes the last
    /// page.
    pub fn clamp_to(&mut self, total: usize) {
        self.go_to(self.current, total);
    }
}
