//! Pagination utilities for Jira search responses.

use serde::Serialize;

/// Default number of issues requested per search page.
pub const DEFAULT_MAX_RESULTS: u32 = 50;

/// A page of results from a Jira search.
///
/// `data` holds the items returned with this page; `total` is the number of
/// matches on the server, so `data.len() <= total` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// Total number of matches across all pages.
    pub total: u64,
    /// The items on this page.
    pub data: Vec<T>,
    /// Offset of the first item on this page.
    pub start_at: u64,
    /// Page size the server applied.
    pub max_results: u64,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    ///
    /// A server-reported `total` smaller than the number of returned items
    /// is raised to `data.len()`.
    #[must_use]
    pub fn new(data: Vec<T>, total: u64, start_at: u64, max_results: u64) -> Self {
        let total = total.max(data.len() as u64);
        Self {
            total,
            data,
            start_at,
            max_results,
        }
    }

    /// Whether more matches exist past this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.data.is_empty() && self.next_start() < self.total
    }

    /// Offset of the item following this page.
    #[must_use]
    pub fn next_start(&self) -> u64 {
        self.start_at + self.data.len() as u64
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            total: self.total,
            data: self.data.into_iter().map(f).collect(),
            start_at: self.start_at,
            max_results: self.max_results,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Offset pagination for issue searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Index of the first issue to return (0-based).
    pub start_at: u64,
    /// Maximum number of issues to return.
    pub max_results: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            start_at: 0,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchParams {
    /// Params for a page starting at `start_at`.
    #[must_use]
    pub fn starting_at(start_at: u64, max_results: u32) -> Self {
        Self {
            start_at,
            max_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_more() {
        // First 50 of 202
        let page: Page<i32> = Page::new(vec![1; 50], 202, 0, 50);
        assert!(page.has_more());
        assert_eq!(page.next_start(), 50);

        // Last 2 of 202
        let page: Page<i32> = Page::new(vec![1; 2], 202, 200, 50);
        assert!(!page.has_more());
    }

    #[test]
    fn test_empty_page_has_no_more() {
        let page: Page<i32> = Page::new(Vec::new(), 10, 0, 50);
        assert!(!page.has_more());
        assert!(page.is_empty());
    }

    #[test]
    fn test_total_never_below_data() {
        let page: Page<i32> = Page::new(vec![1, 2, 3], 1, 0, 50);
        assert_eq!(page.total, 3);
        assert!(page.len() as u64 <= page.total);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 3, 0, 50);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.data, vec![2, 4, 6]);
        assert_eq!(mapped.total, 3);
    }

    #[test]
    fn test_search_params_default() {
        let params = SearchParams::default();
        assert_eq!(params.start_at, 0);
        assert_eq!(params.max_results, DEFAULT_MAX_RESULTS);
    }
}
