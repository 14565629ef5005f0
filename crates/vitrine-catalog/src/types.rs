//! Wire types for the storefront catalog documents.
//!
//! ## Observed shapes
//!
//! ### Products document (`data/produtos.json`)
//! Either a bare JSON array of product objects or an object wrapping the
//! array under `"products"` / `"produtos"`. Per-item fields drift across
//! catalog revisions:
//!
//! - Names: `nome` on newer exports, `name` on older ones.
//! - Prices: `preco`/`price`, as a number or a pt-BR formatted string
//!   (`"50,00"`). We keep the raw representation and parse lazily.
//! - `desconto`: discount percentage, number or numeric string.
//! - `oldprice` / `precoOriginal`: pre-discount price, number or string.
//! - `destaque` / `Destaque`: `true`, `"true"`, or the string `"promocao"`
//!   (which marks a promotion rather than a featured product).
//! - `promocao`: `true` or `"true"`.
//! - Categories: `categoria` (single string) or `categorias` (array).
//!
//! ### Categories document (`data/categorias.json`)
//! Always `{"categorias": [{"nome": ..., "descricao"?: ..., "id"?: ...}]}`.

use serde::Deserialize;
use serde_json::Value;

/// Top-level products document: bare array or wrapped object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductsDocument {
    Bare(Vec<RawProduct>),
    Wrapped(WrappedProducts),
}

#[derive(Debug, Deserialize)]
pub struct WrappedProducts {
    #[serde(alias = "produtos")]
    pub products: Vec<RawProduct>,
}

impl ProductsDocument {
    #[must_use]
    pub fn into_products(self) -> Vec<RawProduct> {
        match self {
            ProductsDocument::Bare(products) => products,
            ProductsDocument::Wrapped(wrapped) => wrapped.products,
        }
    }
}

/// A single product as it appears on the wire, before normalization.
#[derive(Debug, Deserialize)]
pub struct RawProduct {
    /// Numeric or string id; normalized to a string.
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default, rename = "nome", alias = "name")]
    pub name: Option<String>,

    /// Number or string; kept raw because pt-BR catalogs write `"50,00"`.
    #[serde(default, rename = "preco", alias = "price")]
    pub price: Option<Value>,

    #[serde(default, rename = "imagem", alias = "image")]
    pub image: Option<String>,

    /// Discount percentage, number or numeric string.
    #[serde(default, rename = "desconto")]
    pub discount: Option<Value>,

    /// Pre-discount price, number or string.
    #[serde(default, rename = "oldprice", alias = "precoOriginal")]
    pub old_price: Option<Value>,

    /// Featured flag; also doubles as a promotion marker when it holds the
    /// string `"promocao"`.
    #[serde(default, rename = "destaque", alias = "Destaque")]
    pub featured: Option<Value>,

    #[serde(default, rename = "promocao")]
    pub promotion: Option<Value>,

    #[serde(default, rename = "categoria")]
    pub category: Option<String>,

    #[serde(default, rename = "categorias")]
    pub categories: Option<Vec<String>>,
}

/// Top-level categories document.
#[derive(Debug, Deserialize)]
pub struct CategoriesDocument {
    pub categorias: Vec<RawCategory>,
}

/// A single category as it appears on the wire.
#[derive(Debug, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(rename = "nome", alias = "name")]
    pub name: String,

    #[serde(default, rename = "descricao", alias = "description")]
    pub description: Option<String>,
}

/// Interprets the loose boolean encodings seen in the documents: `true` or
/// the string `"true"`.
#[must_use]
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        _ => false,
    }
}

/// Renders a number-or-string field as a display string. Empty strings and
/// non-scalar values are treated as absent.
#[must_use]
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn products_document_accepts_bare_array() {
        let doc: ProductsDocument =
            serde_json::from_value(json!([{"nome": "Vestido", "preco": "50,00"}])).unwrap();
        assert_eq!(doc.into_products().len(), 1);
    }

    #[test]
    fn products_document_accepts_wrapped_forms() {
        for key in ["products", "produtos"] {
            let doc: ProductsDocument =
                serde_json::from_value(json!({key: [{"nome": "Vestido"}]})).unwrap();
            assert_eq!(doc.into_products().len(), 1, "wrapper key {key}");
        }
    }

    #[test]
    fn raw_product_accepts_both_name_spellings() {
        let pt: RawProduct = serde_json::from_value(json!({"nome": "Saia"})).unwrap();
        let en: RawProduct = serde_json::from_value(json!({"name": "Skirt"})).unwrap();
        assert_eq!(pt.name.as_deref(), Some("Saia"));
        assert_eq!(en.name.as_deref(), Some("Skirt"));
    }

    #[test]
    fn raw_product_accepts_capitalized_destaque() {
        let raw: RawProduct = serde_json::from_value(json!({"Destaque": true})).unwrap();
        assert!(raw.featured.as_ref().is_some_and(is_truthy));
    }

    #[test]
    fn is_truthy_accepts_bool_and_string_true() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!("true")));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("promocao")));
        assert!(!is_truthy(&json!(1)));
    }

    #[test]
    fn scalar_to_string_handles_numbers_and_strings() {
        assert_eq!(scalar_to_string(&json!("50,00")).as_deref(), Some("50,00"));
        assert_eq!(scalar_to_string(&json!(150)).as_deref(), Some("150"));
        assert_eq!(scalar_to_string(&json!(99.9)).as_deref(), Some("99.9"));
        assert_eq!(scalar_to_string(&json!("")), None);
        assert_eq!(scalar_to_string(&json!(null)), None);
    }

    #[test]
    fn categories_document_parses_expected_shape() {
        let doc: CategoriesDocument = serde_json::from_value(json!({
            "categorias": [
                {"nome": "Vestidos", "descricao": "Peças leves", "id": 1},
                {"nome": "Saias"}
            ]
        }))
        .unwrap();
        assert_eq!(doc.categorias.len(), 2);
        assert_eq!(doc.categorias[0].name, "Vestidos");
        assert!(doc.categorias[1].description.is_none());
    }
}
