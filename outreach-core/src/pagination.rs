//! Pagination envelope, request parameters and the page-number window.

use serde::{Deserialize, Serialize};

/// Most numbered slots a pagination bar shows.
pub const MAX_WINDOW: u32 = 5;

/// Largest page size the backend accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// List envelope returned by every paginated endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Wrap an unpaginated list response as a single page.
    pub fn single(items: Vec<T>) -> Self {
        let total = items.len();
        Self {
            page: 1,
            page_size: total as u32,
            total: total as u64,
            total_pages: if total == 0 { 0 } else { 1 },
            items,
        }
    }

    pub fn empty() -> Self {
        Self::single(Vec::new())
    }

    pub fn state(&self) -> PaginationState {
        PaginationState {
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

/// Paging query parameters shared by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl PageRequest {
    /// Clamp to the bounds the backend enforces; blank search is dropped.
    pub fn new(page: u32, page_size: u32, search: Option<&str>) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 10, None)
    }
}

/// The envelope's paging fields, mirrored verbatim into page state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            total: 0,
            total_pages: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// 1-based range of rows on the current page, `None` when empty.
    pub fn showing(&self) -> Option<(u64, u64)> {
        if self.total == 0 {
            return None;
        }
        let start = u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size) + 1;
        let end = (start + u64::from(self.page_size) - 1).min(self.total);
        Some((start.min(self.total), end))
    }

    pub fn window(&self) -> Vec<PageSlot> {
        page_window(self.page, self.total_pages)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Number(u32),
    Ellipsis,
}

/// Numbered slots around `current`, bounded to [`MAX_WINDOW`] numbers.
///
/// When there are more pages than fit, the first and last page are always
/// present and gaps are marked with at most two ellipses.
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageSlot> {
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= MAX_WINDOW {
        return (1..=total_pages).map(PageSlot::Number).collect();
    }

    let current = current.clamp(1, total_pages);
    let last = total_pages;
    let mut slots = Vec::with_capacity(7);

    if current <= 3 {
        slots.extend((1..=4).map(PageSlot::Number));
        slots.push(PageSlot::Ellipsis);
        slots.push(PageSlot::Number(last));
    } else if current >= last - 2 {
        slots.push(PageSlot::Number(1));
        slots.push(PageSlot::Ellipsis);
        slots.extend((last - 3..=last).map(PageSlot::Number));
    } else {
        slots.push(PageSlot::Number(1));
        slots.push(PageSlot::Ellipsis);
        slots.extend((current - 1..=current + 1).map(PageSlot::Number));
        slots.push(PageSlot::Ellipsis);
        slots.push(PageSlot::Number(last));
    }
    slots
}

fn first_page() -> u32 {
    1
}
