//! Catalog presentation order: shuffle, promotions-first, and the URL-hash
//! promo trigger.

use rand::seq::SliceRandom;

use crate::catalog::Product;
use crate::normalize::normalize_word;

/// Hash values starting with one of these stems (after normalization) turn
/// the promotions toggle on at page load.
const PROMO_HASH_STEMS: [&str; 2] = ["promo", "ofert"];

/// Shuffles the snapshot in place (Fisher-Yates) so repeat visits see a
/// different arrangement of the same catalog.
pub fn shuffle(products: &mut [Product]) {
    let mut rng = rand::rng();
    products.shuffle(&mut rng);
}

/// Reorders the list so promotional products come first.
///
/// The partition is stable: relative order inside each group is preserved,
/// so a shuffled catalog stays shuffled within the promo and non-promo
/// halves.
pub fn promos_first(products: &mut [Product]) {
    products.sort_by_key(|p| !p.is_promotional);
}

/// Decides whether a page-load URL hash asks for the promotions view.
///
/// The hash is matched fuzzily: after trimming the `#`, folding accents,
/// lowercasing, and stripping a plural suffix, any value starting with a
/// promo stem counts (`#promo`, `#Promoções`, `#ofertas`, ...).
#[must_use]
pub fn hash_requests_promotions(hash: &str) -> bool {
    let cleaned = normalize_word(hash.trim_start_matches('#'));
    !cleaned.is_empty() && PROMO_HASH_STEMS.iter().any(|stem| cleaned.starts_with(stem))
}
