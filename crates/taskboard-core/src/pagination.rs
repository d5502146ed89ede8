//! Offset pagination for store queries.
//!
//! Stores hand out ordered collections one page at a time. Pages are
//! 0-indexed; a request past the last page yields an empty page rather
//! than an error so callers can stop on `has_more == false`.

use serde::{Deserialize, Serialize};

use crate::{TaskboardError, TaskboardResult};

/// A request for one page of an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (0-indexed).
    pub page: usize,
    /// Maximum number of items per page.
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> TaskboardResult<Self> {
        if per_page == 0 {
            return Err(TaskboardError::Validation(
                "per_page must be at least 1".to_string(),
            ));
        }
        Ok(Self { page, per_page })
    }

    /// First page with the given size.
    pub fn first(per_page: usize) -> TaskboardResult<Self> {
        Self::new(0, per_page)
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.per_page)
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page + 1,
            per_page: self.per_page,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: 20,
        }
    }
}

/// One page of items plus the information needed to fetch the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    /// Total number of items across all pages.
    pub total: usize,
    pub total_pages: usize,
    pub has_more: bool,
}

impl<T: Clone> Paginated<T> {
    /// Cut the requested page out of a full ordered slice.
    pub fn from_slice(all: &[T], request: PageRequest) -> Self {
        let total = all.len();
        let start = request.offset().min(total);
        let end = start.saturating_add(request.per_page).min(total);
        Self {
            items: all[start..end].to_vec(),
            page: request.page,
            per_page: request.per_page,
            total,
            total_pages: total.div_ceil(request.per_page),
            has_more: end < total,
        }
    }
}

impl<T> Paginated<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_zero_per_page_rejected() {
        assert!(PageRequest::new(0, 0).is_err());
    }

    #[test]
    fn test_empty_collection() {
        let page = Paginated::from_slice(&items(0), PageRequest::first(10).unwrap());

        assert!(page.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_more);
    }

    #[test]
    fn test_single_page_fits_all() {
        let page = Paginated::from_slice(&items(5), PageRequest::first(10).unwrap());

        assert_eq!(page.items, vec![0, 1, 2, 3, 4]);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_more);
    }

    #[test]
    fn test_middle_page() {
        let page = Paginated::from_slice(&items(20), PageRequest::new(1, 5).unwrap());

        assert_eq!(page.items, vec![5, 6, 7, 8, 9]);
        assert_eq!(page.total_pages, 4);
        assert!(page.has_more);
    }

    #[test]
    fn test_last_partial_page() {
        let page = Paginated::from_slice(&items(12), PageRequest::new(2, 5).unwrap());

        assert_eq!(page.items, vec![10, 11]);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = Paginated::from_slice(&items(3), PageRequest::new(7, 5).unwrap());

        assert!(page.is_empty());
        assert_eq!(page.total, 3);
        assert!(!page.has_more);
    }

    #[test]
    fn test_next_walks_all_items() {
        let all = items(11);
        let mut request = PageRequest::first(4).unwrap();
        let mut seen = Vec::new();
        loop {
            let page = Paginated::from_slice(&all, request);
            seen.extend(page.items.iter().copied());
            if !page.has_more {
                break;
            }
            request = request.next();
        }
        assert_eq!(seen, all);
    }

    #[test]
    fn test_map_keeps_paging_fields() {
        let page = Paginated::from_slice(&items(6), PageRequest::new(1, 4).unwrap());
        let mapped = page.map(|i| i * 10);
        assert_eq!(mapped.items, vec![40, 50]);
        assert_eq!(mapped.total, 6);
        assert_eq!(mapped.page, 1);
    }
}
