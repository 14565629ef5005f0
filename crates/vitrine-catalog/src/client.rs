//! HTTP client for the storefront's static catalog documents.

use std::time::Duration;

use reqwest::Client;

use vitrine_core::{Category, Product};

use crate::error::CatalogError;
use crate::normalize::{normalize_categories, normalize_products};
use crate::types::{CategoriesDocument, ProductsDocument};

/// Client for the product and category JSON documents.
///
/// Loads are single-attempt: a fetch or parse failure surfaces immediately
/// as a typed [`CatalogError`] and the caller renders the static error
/// state. There is deliberately no retry here — the documents are static
/// files and the page either has them or it does not.
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The underlying HTTP client, shared with the image cache so thumbnail
    /// fetches reuse the same pool and timeout.
    #[must_use]
    pub fn http(&self) -> &Client {
        &self.client
    }

    /// Fetches and normalizes the products document.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] — HTTP 404.
    /// - [`CatalogError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`CatalogError::Http`] — network or TLS failure.
    /// - [`CatalogError::Deserialize`] — body is not a recognized products
    ///   document.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = format!("{}/data/produtos.json", self.base_url);
        let body = self.fetch_document(&url).await?;
        let document =
            serde_json::from_str::<ProductsDocument>(&body).map_err(|e| {
                CatalogError::Deserialize {
                    context: format!("products document from {url}"),
                    source: e,
                }
            })?;
        Ok(normalize_products(document.into_products()))
    }

    /// Fetches and normalizes the categories document.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`CatalogClient::fetch_products`].
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = format!("{}/data/categorias.json", self.base_url);
        let body = self.fetch_document(&url).await?;
        let document =
            serde_json::from_str::<CategoriesDocument>(&body).map_err(|e| {
                CatalogError::Deserialize {
                    context: format!("categories document from {url}"),
                    source: e,
                }
            })?;
        Ok(normalize_categories(document.categorias))
    }

    async fn fetch_document(&self, url: &str) -> Result<String, CatalogError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            // The documents are re-exported in place; never serve a stale copy.
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}
