//! Free-text query matching over the catalog.
//!
//! Two match modes exist: name mode (the default search box) and category
//! mode (entered by clicking a category card, carried in the query string as
//! a flag). Suggestion ranking backs the header quick-search dropdown.

use crate::catalog::Product;
use crate::normalize::{normalize_text, normalize_word, singularize};

/// Maximum number of entries returned by [`rank_suggestions`].
const SUGGESTION_LIMIT: usize = 10;

/// How a free-text query is matched against a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every query word must appear in the product name.
    Name,
    /// The whole query must appear in one of the product's category labels.
    Category,
}

/// Returns `true` when every normalized query word appears as a substring of
/// the normalized product name, accepting the word with a trailing `s`
/// appended so a singular query still matches a plural name.
///
/// An empty query matches every product.
#[must_use]
pub fn matches_name(query: &str, name: &str) -> bool {
    let name_norm = normalize_text(name);
    query.split_whitespace().map(normalize_word).all(|word| {
        name_norm.contains(&word) || name_norm.contains(&format!("{word}s"))
    })
}

/// Returns `true` when any of the product's category labels, normalized,
/// contains the normalized query.
#[must_use]
pub fn matches_category(query: &str, category_names: &[String]) -> bool {
    let term = normalize_word(query);
    category_names
        .iter()
        .any(|name| normalize_word(name).contains(&term))
}

/// Filters the catalog snapshot down to the products matching `query` in the
/// given mode, preserving input order. The snapshot itself is never mutated;
/// the result is a derived list.
#[must_use]
pub fn search(products: &[Product], query: &str, mode: MatchMode) -> Vec<Product> {
    products
        .iter()
        .filter(|p| match mode {
            MatchMode::Name => matches_name(query, &p.name),
            MatchMode::Category => matches_category(query, &p.category_names),
        })
        .cloned()
        .collect()
}

/// Ranks product names for the quick-search dropdown.
///
/// Both the query and each product name are split into singularized words.
/// A product qualifies when every query term is a substring of some name
/// word; its score is the sum of the matched word indices (earlier matches
/// rank higher), tie-broken by catalog position. At most
/// [`SUGGESTION_LIMIT`] names are returned. An empty query yields nothing.
#[must_use]
pub fn rank_suggestions(products: &[Product], query: &str) -> Vec<String> {
    let query_norm = normalize_text(query);
    let terms: Vec<&str> = query_norm.split_whitespace().map(singularize).collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, String)> = Vec::new();
    for (index, product) in products.iter().enumerate() {
        let name_norm = normalize_text(&product.name);
        let words: Vec<&str> = name_norm.split_whitespace().map(singularize).collect();
        if words.is_empty() {
            continue;
        }

        let mut score = 0usize;
        let mut all_found = true;
        for term in &terms {
            match words.iter().position(|w| w.contains(term)) {
                Some(pos) => score += pos,
                None => {
                    all_found = false;
                    break;
                }
            }
        }

        if all_found {
            ranked.push((score * 100 + index, product.name.clone()));
        }
    }

    ranked.sort_by_key(|(rank, _)| *rank);
    ranked
        .into_iter()
        .take(SUGGESTION_LIMIT)
        .map(|(_, name)| name)
        .collect()
}
