//! Fixed-size page window over a filtered sequence.

use serde::Serialize;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Snapshot of the page window for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub page_size: usize,
    pub has_more: bool,
}

/// Owns a filtered sequence and the current 1-based page.
///
/// Invariant: `1 <= current_page <= max(1, total_pages)`. Requests that
/// would break it are ignored rather than reported as errors.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    page_size: usize,
    current_page: usize,
}

impl<T> Paginator<T> {
    /// Creates a paginator on page 1. A zero page size is treated as 1.
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Installs a new sequence and goes back to page 1.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.current_page = 1;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(total / page_size)`; zero for an empty sequence.
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size)
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Moves to `page` if `1 <= page <= max(total_pages, 1)`.
    ///
    /// Returns false and leaves the window untouched otherwise.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages().max(1) {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Advances one page; no-op on the last page (never wraps).
    pub fn next_page(&mut self) -> bool {
        if !self.has_more() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Goes back one page; no-op on page 1.
    pub fn prev_page(&mut self) -> bool {
        if self.current_page <= 1 {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Items in `[(page - 1) * size, page * size)`, clipped to the sequence.
    pub fn current_slice(&self) -> &[T] {
        let start = ((self.current_page - 1) * self.page_size).min(self.items.len());
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    pub fn info(&self) -> PageInfo {
        PageInfo {
            current_page: self.current_page,
            total_pages: self.total_pages(),
            total_count: self.total_count(),
            page_size: self.page_size,
            has_more: self.has_more(),
        }
    }
}
