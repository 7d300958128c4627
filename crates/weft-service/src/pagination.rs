//! Page-number pagination for workflow searches.

use serde::{Deserialize, Serialize};

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Requested page: 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of items per page.
    pub page_size: usize,
    /// 1-based page number.
    pub page_num: usize,
}

impl PageRequest {
    /// Creates a page request, clamping both values to at least 1.
    pub fn new(page_num: usize, page_size: usize) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            page_num: page_num.max(1),
        }
    }

    /// Returns the number of items to skip.
    pub fn offset(&self) -> usize {
        (self.page_num - 1).saturating_mul(self.page_size)
    }

    /// Returns the slice of `items` this request selects.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size)
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Pagination details of a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Number of items in this page.
    pub page_size: usize,
    /// 1-based page number.
    pub page_num: usize,
    /// Number of pages for the requested page size.
    pub page_count: usize,
    /// Number of items across all pages.
    pub total_count: usize,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowPage<T> {
    /// Items in this page.
    pub workflows: Vec<T>,
    /// Pagination details.
    pub pagination: Pagination,
}

impl<T> WorkflowPage<T> {
    /// Creates a page from its items, the request and the total match count.
    pub fn new(workflows: Vec<T>, request: PageRequest, total_count: usize) -> Self {
        let pagination = Pagination {
            page_size: workflows.len(),
            page_num: request.page_num,
            page_count: total_count.div_ceil(request.page_size),
            total_count,
        };
        Self {
            workflows,
            pagination,
        }
    }

    /// Returns whether the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    /// Maps the items to a different type.
    pub fn map<U, F>(self, f: F) -> WorkflowPage<U>
    where
        F: FnMut(T) -> U,
    {
        WorkflowPage {
            workflows: self.workflows.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
