//! Normalization from raw catalog documents to [`vitrine_core::Product`] and
//! [`vitrine_core::Category`].
//!
//! The documents are hand-maintained exports, so normalization is lenient:
//! a malformed item is logged and skipped rather than failing the whole
//! page load.

use vitrine_core::{Category, Product};

use crate::error::CatalogError;
use crate::types::{is_truthy, scalar_to_string, RawCategory, RawProduct};

/// Normalizes a whole products document, skipping items that fail with a
/// warning. Item order is preserved.
#[must_use]
pub fn normalize_products(raw: Vec<RawProduct>) -> Vec<Product> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, item)| match normalize_product(item, index) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(error = %e, index, "skipping malformed catalog item");
                None
            }
        })
        .collect()
}

/// Normalizes a raw catalog item into a [`Product`].
///
/// Derivations:
/// - `is_featured` when `destaque` is `true`/`"true"`.
/// - `is_promotional` when the item has a discount, an original price, a
///   truthy `promocao`, or `destaque == "promocao"`.
/// - A missing `id` falls back to the item's 1-based catalog position.
///
/// # Errors
///
/// Returns [`CatalogError::Normalization`] if the item has no name.
pub fn normalize_product(raw: RawProduct, index: usize) -> Result<Product, CatalogError> {
    let name = raw
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| CatalogError::Normalization {
            index,
            reason: "product has no name".into(),
        })?;

    let id = raw
        .id
        .as_ref()
        .and_then(scalar_to_string)
        .unwrap_or_else(|| (index + 1).to_string());

    let price = raw
        .price
        .as_ref()
        .and_then(scalar_to_string)
        .unwrap_or_default();

    let old_price = raw.old_price.as_ref().and_then(scalar_to_string);

    let discount_percent = raw
        .discount
        .as_ref()
        .and_then(scalar_to_string)
        .and_then(|s| s.trim().parse::<u8>().ok());

    let is_featured = raw.featured.as_ref().is_some_and(is_truthy);

    let marked_promotion = raw
        .featured
        .as_ref()
        .and_then(|v| v.as_str())
        .is_some_and(|s| s == "promocao");

    let is_promotional = raw.discount.is_some()
        || raw.old_price.is_some()
        || raw.promotion.as_ref().is_some_and(is_truthy)
        || marked_promotion;

    // `categorias` wins when both spellings are present.
    let category_names = match (raw.categories, raw.category) {
        (Some(list), _) if !list.is_empty() => list,
        (_, Some(single)) => vec![single],
        _ => Vec::new(),
    };

    Ok(Product {
        id,
        name,
        price,
        old_price,
        discount_percent,
        image_url: raw.image.unwrap_or_default(),
        category_names,
        is_featured,
        is_promotional,
    })
}

/// Normalizes the categories document. Empty descriptions become `None`.
#[must_use]
pub fn normalize_categories(raw: Vec<RawCategory>) -> Vec<Category> {
    raw.into_iter()
        .map(|item| Category {
            id: item.id.as_ref().and_then(scalar_to_string),
            name: item.name.trim().to_owned(),
            description: item.description.filter(|d| !d.trim().is_empty()),
        })
        .collect()
}
