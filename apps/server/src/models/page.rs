//! Offset pagination types

use serde::Serialize;

/// Zero-based page window requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Row offset of the first element of this page, saturating at `i64::MAX`.
    pub fn offset(&self) -> i64 {
        i64::from(self.page).saturating_mul(i64::from(self.page_size))
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: 10,
        }
    }
}

/// One page of results plus the total number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub number: u32,
    pub size: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let size = i64::from(request.page_size);
        let total_pages = if size == 0 {
            1
        } else {
            (total_elements + size - 1) / size
        };
        let number_of_elements = content.len();

        Self {
            total_elements,
            total_pages,
            number: request.page,
            size: request.page_size,
            number_of_elements,
            first: request.page == 0,
            last: i64::from(request.page) + 1 >= total_pages,
            empty: content.is_empty(),
            content,
        }
    }

    /// Transform every element, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}
