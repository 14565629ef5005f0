//! HTML fragment rendering for the storefront views.
//!
//! Every function returns a self-contained markup fragment the page drops
//! into a container element. All dynamic text goes through `html-escape`.

pub mod categories;
pub mod controls;
pub mod format;
pub mod product_card;

pub use categories::{
    category_search_href, render_categories_error, render_category_grid, render_category_sections,
};
pub use controls::{render_pagination, render_promo_toggle};
pub use format::{format_price, limit_title, TITLE_LIMIT};
pub use product_card::{render_load_error, render_no_results, render_product_card, render_product_grid};
