//! Fixed-size pagination and the page-number window.
//!
//! Pages are 1-based. Requests outside `1..=total_pages` are clamped, and an
//! empty sequence still has one (empty) page. Resetting to page 1 when the
//! page size or the result set changes is the caller's policy; see
//! [`CatalogSession`](crate::session::CatalogSession).

use std::ops::RangeInclusive;

/// One page of a result sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page, at most `page_size` of them.
    pub items: &'a [T],
    /// The clamped 1-based page number.
    pub current_page: usize,
    /// `max(1, ceil(len / page_size))`.
    pub total_pages: usize,
    /// Effective page size (never zero).
    pub page_size: usize,
    /// Total number of items across all pages.
    pub total_items: usize,
}

impl<'a, T> Page<'a, T> {
    /// True when a previous page exists.
    #[inline]
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// True when a following page exists.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 0-based offset of the first item within the full sequence.
    #[inline]
    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }

    /// Page-number buttons to show around this page.
    pub fn window(&self, max_buttons: usize) -> RangeInclusive<usize> {
        page_window(self.current_page, self.total_pages, max_buttons)
    }
}

/// Number of pages needed for `len` items, never less than one.
#[inline]
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Returns page `requested_page` of `items`.
///
/// A `page_size` of zero is treated as one.
pub fn paginate<T>(items: &[T], page_size: usize, requested_page: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let current_page = requested_page.clamp(1, total_pages);

    let start = ((current_page - 1) * page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        current_page,
        total_pages,
        page_size,
        total_items: items.len(),
    }
}

/// Contiguous run of page numbers centered on `current`.
///
/// The window holds `min(max_buttons, total)` pages, shifted so it never
/// runs past either end. When everything fits, it is `1..=total`.
pub fn page_window(current: usize, total: usize, max_buttons: usize) -> RangeInclusive<usize> {
    let total = total.max(1);
    let max_buttons = max_buttons.max(1);
    if total <= max_buttons {
        return 1..=total;
    }

    let current = current.clamp(1, total);
    let half = (max_buttons - 1) / 2;
    let start = current.saturating_sub(half).max(1);
    let end = (start + max_buttons - 1).min(total);
    let start = end + 1 - max_buttons;

    start..=end
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamps_out_of_range_pages() {
        let items: Vec<u32> = (0..37).collect();

        let page = paginate(&items, 10, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.items, &items[0..10]);

        let page = paginate(&items, 10, 1_000_000);
        assert_eq!(page.current_page, 4);
        assert_eq!(page.items, &items[30..37]);
        assert!(!page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn empty_sequence_has_one_empty_page() {
        let items: [u32; 0] = [];
        let page = paginate(&items, 20, 3);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_prev() && !page.has_next());
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let items: Vec<u32> = (0..40).collect();
        assert_eq!(paginate(&items, 20, 9).total_pages, 2);
        assert_eq!(paginate(&items, 20, 2).offset(), 20);
    }

    #[test]
    fn zero_page_size_acts_as_one() {
        let items = [1, 2, 3];
        let page = paginate(&items, 0, 2);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, &[2]);
    }

    #[test]
    fn window_shows_all_when_few_pages() {
        assert_eq!(page_window(1, 1, 7), 1..=1);
        assert_eq!(page_window(3, 5, 7), 1..=5);
        assert_eq!(page_window(7, 7, 7), 1..=7);
    }

    #[test]
    fn window_centers_and_clamps() {
        assert_eq!(page_window(1, 20, 7), 1..=7);
        assert_eq!(page_window(4, 20, 7), 1..=7);
        assert_eq!(page_window(5, 20, 7), 2..=8);
        assert_eq!(page_window(10, 20, 7), 7..=13);
        assert_eq!(page_window(18, 20, 7), 14..=20);
        assert_eq!(page_window(20, 20, 7), 14..=20);
        assert_eq!(page_window(99, 20, 7), 14..=20);
    }

    #[test]
    fn window_with_even_button_count() {
        assert_eq!(page_window(10, 20, 6), 8..=13);
        assert_eq!(page_window(1, 20, 1), 1..=1);
        assert_eq!(page_window(10, 20, 1), 10..=10);
    }

    proptest! {
        #[test]
        fn pages_cover_sequence_exactly_once(len in 0usize..500, size in 1usize..60) {
            let items: Vec<usize> = (0..len).collect();
            let total = paginate(&items, size, 1).total_pages;
            let mut seen = Vec::with_capacity(len);
            for p in 1..=total {
                let page = paginate(&items, size, p);
                prop_assert_eq!(page.current_page, p);
                prop_assert!(page.items.len() <= size);
                seen.extend_from_slice(page.items);
            }
            prop_assert_eq!(seen, items);
        }

        #[test]
        fn window_is_bounded_and_contains_current(
            total in 1usize..300,
            current in 1usize..300,
            buttons in 1usize..12,
        ) {
            let current = current.min(total);
            let window = page_window(current, total, buttons);
            prop_assert!(*window.start() >= 1);
            prop_assert!(*window.end() <= total);
            prop_assert!(window.contains(&current));
            prop_assert_eq!(window.end() - window.start() + 1, buttons.min(total));
        }
    }
}
