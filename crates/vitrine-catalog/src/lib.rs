pub mod client;
pub mod error;
pub mod image_cache;
pub mod normalize;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use image_cache::{CacheLookup, EnsureStats, ImageCache, DEFAULT_TTL_SECS};
pub use normalize::{normalize_categories, normalize_products};
pub use types::{CategoriesDocument, ProductsDocument, RawCategory, RawProduct};
