//! Page slicing and page counts.

use serde::{Deserialize, Serialize};

/// Number of pages needed for `len` items, never less than one.
///
/// An empty listing still has page 1 so controls never read "page 1 of 0".
/// A zero `page_size` also yields one page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Items `[(page-1)*page_size, page*page_size)` of `source`.
///
/// Pages are 1-indexed. Page 0, a zero page size, or a page past the end
/// give an empty slice.
pub fn paginate<T>(source: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = match (page - 1).checked_mul(page_size) {
        Some(start) if start < source.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(page_size).min(source.len());
    &source[start..end]
}

/// Pagination info for rendering controls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let total_pages = total_pages(total, per_page);
        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Whether the current page lies past the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.page == 0 || self.page > self.total_pages
    }

    /// Get start item number (1-indexed), 0 when the page is empty.
    pub fn start_item(&self) -> usize {
        if self.total == 0 || self.is_out_of_range() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        if self.is_out_of_range() {
            0
        } else {
            (self.page * self.per_page).min(self.total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_matches_ceiling_with_floor_of_one() {
        for k in 1..=12usize {
            for n in 0..=60usize {
                let expected = std::cmp::max(1, (n + k - 1) / k);
                assert_eq!(total_pages(n, k), expected, "n={} k={}", n, k);
            }
        }
    }

    #[test]
    fn test_total_pages_empty_source_is_one() {
        assert_eq!(total_pages(0, 10), 1);
    }

    #[test]
    fn test_pages_past_the_end_are_empty() {
        let items: Vec<usize> = (0..25).collect();
        for k in 1..=12usize {
            let last = total_pages(items.len(), k);
            for page in last + 1..last + 4 {
                assert!(paginate(&items, page, k).is_empty());
            }
        }
    }

    #[test]
    fn test_twenty_five_items_page_size_ten() {
        let items: Vec<usize> = (1..=25).collect();
        assert_eq!(paginate(&items, 1, 10), &items[0..10]);
        assert_eq!(paginate(&items, 3, 10), &[21, 22, 23, 24, 25]);
        assert!(paginate(&items, 4, 10).is_empty());
        assert_eq!(total_pages(items.len(), 10), 3);
    }

    #[test]
    fn test_degenerate_arguments_do_not_panic() {
        let items = [1, 2, 3];
        assert!(paginate(&items, 0, 10).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
        assert!(paginate(&items, usize::MAX, usize::MAX).is_empty());
        assert_eq!(paginate(&items, 1, usize::MAX), &items);
        assert_eq!(total_pages(3, 0), 1);
    }

    #[test]
    fn test_pagination_info() {
        let p = Pagination::new(2, 10, 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.start_item(), 11);
        assert_eq!(p.end_item(), 20);
    }

    #[test]
    fn test_pagination_out_of_range() {
        let p = Pagination::new(4, 10, 25);
        assert!(p.is_out_of_range());
        assert!(!p.has_next);
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert!(!p.has_prev);
        assert_eq!(p.start_item(), 0);
    }
}
