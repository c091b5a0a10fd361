//! Fixed-size, 1-indexed pagination for public list endpoints.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_PAGE_SIZE: usize = 9;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `items` into the requested 1-indexed page. Page 0 is treated as
/// page 1; a page past the end yields an empty item list.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let start = (page - 1).saturating_mul(page_size);
    let slice = if start >= total_items {
        &[]
    } else {
        &items[start..(start + page_size).min(total_items)]
    };

    Page {
        items: slice.to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
    }
}
