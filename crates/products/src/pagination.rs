//! Pagination calculator and page selector.
//!
//! Out-of-range requests are clamped, never rejected: a descriptor built by
//! [`calculate`] always satisfies `1 <= current_page <= total_pages`, and
//! `total_pages` is at least 1 even for an empty collection.

use serde::Serialize;

use storefront_core::ValueObject;

/// Page size used until the caller picks another one.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Upper bound on page links shown before the strip collapses into ellipses.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Normalized page descriptor.
///
/// Fields are private so the clamping invariant cannot be broken from outside;
/// build one with [`calculate`] or derive a new one with
/// [`with_page`](Self::with_page) / [`with_page_size`](Self::with_page_size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PaginationState {
    current_page: usize,
    total_pages: usize,
    total_items: usize,
    page_size: usize,
}

impl ValueObject for PaginationState {}

impl Default for PaginationState {
    fn default() -> Self {
        calculate(0, DEFAULT_PAGE_SIZE, 1)
    }
}

/// Build a page descriptor.
///
/// `requested_page` may be any integer; it is clamped into
/// `1..=total_pages`. A `page_size` of 0 is treated as 1.
pub fn calculate(total_items: usize, page_size: usize, requested_page: i64) -> PaginationState {
    let page_size = page_size.max(1);
    let total_pages = total_items.div_ceil(page_size).max(1);
    let upper = i64::try_from(total_pages).unwrap_or(i64::MAX);
    let current_page = requested_page.clamp(1, upper) as usize;

    PaginationState {
        current_page,
        total_pages,
        total_items,
        page_size,
    }
}

impl PaginationState {
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.current_page - 1).saturating_mul(self.page_size)
    }

    /// Same collection and page size, different requested page.
    pub fn with_page(&self, requested_page: i64) -> Self {
        calculate(self.total_items, self.page_size, requested_page)
    }

    /// Same collection, new page size; the current page is reclamped.
    pub fn with_page_size(&self, page_size: usize) -> Self {
        calculate(self.total_items, page_size, self.current_page as i64)
    }

    /// Same page size and requested page, new item count.
    pub fn with_total_items(&self, total_items: usize) -> Self {
        calculate(total_items, self.page_size, self.current_page as i64)
    }

    /// 1-based inclusive range of items on the current page
    /// ("showing 13–24 of 25"). `None` when there is nothing to show.
    pub fn result_range(&self) -> Option<(usize, usize)> {
        if self.total_items == 0 {
            return None;
        }
        let start = self.offset() + 1;
        let end = self
            .current_page
            .saturating_mul(self.page_size)
            .min(self.total_items);
        Some((start, end))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether a page strip is worth showing at all.
    pub fn is_paginated(&self) -> bool {
        self.total_pages > 1
    }

    pub fn page_window(&self) -> Vec<PageLink> {
        page_window(self.current_page, self.total_pages)
    }
}

/// Slice of `items` visible on the current page.
///
/// Never panics: ranges past the end of `items` come back empty.
pub fn select_page<'a, T>(items: &'a [T], pagination: &PaginationState) -> &'a [T] {
    let start = pagination.offset().min(items.len());
    let end = start.saturating_add(pagination.page_size()).min(items.len());
    &items[start..end]
}

/// One entry in a page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Page-number strip around `current`.
///
/// Shows every page when there are at most [`MAX_VISIBLE_PAGES`]; otherwise
/// the first page, the neighbours of `current`, the last page, and an ellipsis
/// wherever pages are skipped.
pub fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    let total = total.max(1);
    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageLink::Page).collect();
    }

    let current = current.clamp(1, total);
    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);

    let mut links = vec![PageLink::Page(1)];
    if start > 2 {
        links.push(PageLink::Ellipsis);
    }
    links.extend((start..=end).map(PageLink::Page));
    if end < total - 1 {
        links.push(PageLink::Ellipsis);
    }
    links.push(PageLink::Page(total));
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageLink::{Ellipsis, Page};

    #[test]
    fn empty_collection_is_a_single_empty_page() {
        let p = calculate(0, 12, 1);
        assert_eq!(p.total_pages(), 1);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.total_items(), 0);
        assert_eq!(p.result_range(), None);
        assert!(!p.is_paginated());
    }

    #[test]
    fn twenty_five_items_in_pages_of_twelve() {
        let p = calculate(25, 12, 5);
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.current_page(), 3);
        assert_eq!(p.result_range(), Some((25, 25)));

        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(select_page(&items, &p), &[25]);
        assert_eq!(select_page(&items, &p.with_page(2)), &(13..=24).collect::<Vec<u32>>()[..]);
    }

    #[test]
    fn requested_page_is_clamped_on_both_sides() {
        assert_eq!(calculate(30, 10, 0).current_page(), 1);
        assert_eq!(calculate(30, 10, -7).current_page(), 1);
        assert_eq!(calculate(30, 10, i64::MAX).current_page(), 3);
        assert_eq!(calculate(30, 10, 2).current_page(), 2);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let p = calculate(3, 0, 2);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.total_pages(), 3);
    }

    #[test]
    fn changing_page_size_reclamps_current_page() {
        let p = calculate(100, 10, 9);
        let bigger = p.with_page_size(50);
        assert_eq!(bigger.total_pages(), 2);
        assert_eq!(bigger.current_page(), 2);

        let smaller = bigger.with_page_size(25);
        assert_eq!(smaller.total_pages(), 4);
        assert_eq!(smaller.current_page(), 2);
    }

    #[test]
    fn result_range_on_partial_last_page() {
        let p = calculate(25, 12, 2);
        assert_eq!(p.result_range(), Some((13, 24)));
        assert!(p.has_previous());
        assert!(p.has_next());
    }

    #[test]
    fn select_page_never_panics_on_stale_descriptor() {
        let stale = calculate(100, 10, 10);
        let items = vec!['a', 'b', 'c'];
        assert!(select_page(&items, &stale).is_empty());
    }

    #[test]
    fn small_page_counts_show_every_page() {
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        assert_eq!(page_window(3, 5), vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
    }

    #[test]
    fn page_window_collapses_far_pages() {
        assert_eq!(page_window(1, 10), vec![Page(1), Page(2), Ellipsis, Page(10)]);
        assert_eq!(
            page_window(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(page_window(10, 10), vec![Page(1), Ellipsis, Page(9), Page(10)]);
        assert_eq!(page_window(3, 6), vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(6)]);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: any requested page lands inside 1..=total_pages.
            #[test]
            fn current_page_is_always_in_range(
                total in 0usize..10_000,
                size in 1usize..200,
                requested in any::<i64>()
            ) {
                let p = calculate(total, size, requested);
                prop_assert!(p.total_pages() >= 1);
                prop_assert!(p.current_page() >= 1);
                prop_assert!(p.current_page() <= p.total_pages());
                prop_assert_eq!(p.total_pages(), total.div_ceil(size).max(1));
            }

            /// Property: the page slice is bounded by page_size and matches the range.
            #[test]
            fn select_page_is_bounded(
                total in 0usize..500,
                size in 1usize..50,
                requested in -5i64..100
            ) {
                let items: Vec<usize> = (0..total).collect();
                let p = calculate(total, size, requested);
                let page = select_page(&items, &p);
                prop_assert!(page.len() <= size);
                match p.result_range() {
                    Some((start, end)) => prop_assert_eq!(page.len(), end - start + 1),
                    None => prop_assert!(page.is_empty()),
                }
            }

            /// Property: the strip always starts at page 1, ends at the last
            /// page, and contains the current page.
            #[test]
            fn page_window_brackets_current_page(total in 1usize..200, current in 1usize..200) {
                let current = current.min(total);
                let links = page_window(current, total);
                prop_assert_eq!(links.first(), Some(&PageLink::Page(1)));
                prop_assert_eq!(links.last(), Some(&PageLink::Page(total)));
                prop_assert!(links.contains(&PageLink::Page(current)));
            }
        }
    }
}
