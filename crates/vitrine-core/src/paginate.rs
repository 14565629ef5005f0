//! Fixed-size pagination over a derived product list.

/// Default number of products per page on the search results view.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// One page of a derived list, with the state the pagination controls need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The served page number, clamped into `[1, total_pages]`.
    pub page: usize,
    /// Always at least 1, even for an empty list.
    pub total_pages: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slices `items` into the requested page.
///
/// `total_pages = max(1, ceil(len / page_size))` and the requested page is
/// clamped into range, so out-of-range requests serve the nearest valid
/// page rather than an empty one.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], requested_page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);
    let page = requested_page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    let items = if start >= items.len() {
        Vec::new()
    } else {
        items[start..end].to_vec()
    };

    Page {
        items,
        page,
        total_pages,
    }
}
