use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::filter::parse_price;

/// A product from the storefront catalog document, normalized for search,
/// filtering, and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// Display name of the product (e.g., `"Vestido Azul"`).
    pub name: String,
    /// Price exactly as the catalog document carries it, e.g. `"50,00"` or
    /// `"150"`. Numeric interpretation goes through [`Product::numeric_price`].
    pub price: String,
    /// Pre-discount price, present when the product is on sale.
    pub old_price: Option<String>,
    /// Percentage shown on the discount badge (`30` renders as `30% OFF`).
    pub discount_percent: Option<u8>,
    pub image_url: String,
    /// Category labels the product belongs to. The source document carries
    /// either a single string or an array; normalization flattens both here.
    pub category_names: Vec<String>,
    /// Flagged for homepage / highlighted display.
    pub is_featured: bool,
    /// Derived at normalization: the product has a discount, an original
    /// price, or an explicit promotion flag.
    pub is_promotional: bool,
}

impl Product {
    /// Returns the price parsed as a decimal, tolerating comma decimal
    /// separators. `None` when the price string is not numeric.
    #[must_use]
    pub fn numeric_price(&self) -> Option<Decimal> {
        parse_price(&self.price)
    }

    /// Returns `true` if the product card should show a discount badge.
    #[must_use]
    pub fn has_discount_badge(&self) -> bool {
        self.discount_percent.is_some()
    }

    /// Returns `true` if the product belongs to the named category,
    /// compared case-insensitively after trimming.
    #[must_use]
    pub fn in_category(&self, category_name: &str) -> bool {
        let wanted = category_name.trim().to_lowercase();
        self.category_names
            .iter()
            .any(|c| c.trim().to_lowercase() == wanted)
    }
}

/// A storefront category from the category document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn make_product(name: &str, price: &str) -> Product {
        Product {
            id: "p1".to_string(),
            name: name.to_string(),
            price: price.to_string(),
            old_price: None,
            discount_percent: None,
            image_url: "./assets/images/p1.png".to_string(),
            category_names: vec!["Vestidos".to_string()],
            is_featured: false,
            is_promotional: false,
        }
    }

    #[test]
    fn numeric_price_parses_comma_decimal() {
        let product = make_product("Vestido Azul", "50,00");
        assert_eq!(product.numeric_price(), Some(Decimal::new(5000, 2)));
    }

    #[test]
    fn numeric_price_parses_plain_integer() {
        let product = make_product("Vestido Verde", "150");
        assert_eq!(product.numeric_price(), Some(Decimal::from(150)));
    }

    #[test]
    fn numeric_price_none_for_garbage() {
        let product = make_product("Vestido", "a combinar");
        assert_eq!(product.numeric_price(), None);
    }

    #[test]
    fn discount_badge_follows_discount_percent() {
        let mut product = make_product("Vestido", "99,90");
        assert!(!product.has_discount_badge());
        product.discount_percent = Some(30);
        assert!(product.has_discount_badge());
    }

    #[test]
    fn in_category_is_case_insensitive_and_trims() {
        let product = make_product("Vestido", "80");
        assert!(product.in_category("  vestidos "));
        assert!(!product.in_category("Saias"));
    }

    #[test]
    fn serde_roundtrip_product() {
        let product = make_product("Vestido Azul", "50,00");
        let json = serde_json::to_string(&product).expect("serialization failed");
        let decoded: Product = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded, product);
    }
}
