//! Explicit page-controller state for the search view.
//!
//! The reset rules live here so every caller gets the same behavior: a new
//! query or a filter change returns to page one, and toggling promotions
//! additionally clears the price filter. The page number is only clamped
//! against the result count at pagination time, since the result list is
//! derived per render.

use crate::filter::PriceFilter;
use crate::paginate::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub price_filter: PriceFilter,
    /// Whether promotional products are ordered first.
    pub promo_first: bool,
    /// Requested page, kept >= 1; clamped to the total at pagination time.
    pub page: usize,
    pub page_size: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl SearchState {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            price_filter: PriceFilter::All,
            promo_first: false,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// A new search always starts on page one.
    pub fn submit_query(&mut self, query: &str) {
        self.query = query.trim().to_owned();
        self.page = 1;
    }

    /// Changing the price filter returns to page one.
    pub fn select_price_filter(&mut self, filter: PriceFilter) {
        self.price_filter = filter;
        self.page = 1;
    }

    /// Toggling promotions resets both the page and the price filter.
    pub fn toggle_promotions(&mut self, enabled: bool) {
        self.promo_first = enabled;
        self.price_filter = PriceFilter::All;
        self.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }
}
