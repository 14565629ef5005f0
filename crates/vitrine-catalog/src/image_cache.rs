//! Persistent image data-URL cache.
//!
//! Product thumbnails are fetched once, converted to `data:` URLs, and kept
//! in an embedded per-key store with a fixed time-to-live. A failed fetch is
//! remembered as a negative entry so a render loop does not retry the same
//! broken URL on every pass; the card falls back to the source URL instead.
//!
//! Entries are read and written individually — there is no whole-map
//! read-modify-write, so interleaved writers cannot lose each other's
//! updates.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};

use vitrine_core::Product;

use crate::error::CatalogError;

const IMAGES: TableDefinition<&str, &[u8]> = TableDefinition::new("images");

/// Default entry time-to-live: four hours.
pub const DEFAULT_TTL_SECS: u64 = 4 * 60 * 60;

/// One stored cache entry, keyed by the source image URL.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// `None` records a failed fetch (negative entry).
    data_url: Option<String>,
    fetched_at_ms: i64,
}

/// Result of a cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(String),
    /// The URL failed to fetch recently; do not retry this render.
    Negative,
    Miss,
}

/// Counts returned by [`ImageCache::ensure_for_page`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnsureStats {
    pub fetched: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Embedded image cache backed by a redb file.
pub struct ImageCache {
    db: Database,
    ttl_ms: i64,
}

impl ImageCache {
    /// Opens (or creates) the cache database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] if the database cannot be opened or
    /// the table cannot be created.
    pub fn open(path: &Path, ttl_secs: u64) -> Result<Self, CatalogError> {
        let db = Database::create(path).map_err(redb::Error::from)?;

        // Ensure the table exists so first reads do not fail.
        let txn = db.begin_write().map_err(redb::Error::from)?;
        {
            let _ = txn.open_table(IMAGES).map_err(redb::Error::from)?;
        }
        txn.commit().map_err(redb::Error::from)?;

        let ttl_ms = i64::try_from(ttl_secs)
            .unwrap_or(i64::MAX / 1000)
            .saturating_mul(1000);
        Ok(Self { db, ttl_ms })
    }

    /// Looks up a data URL by source URL.
    ///
    /// Entries older than the TTL are deleted and reported as
    /// [`CacheLookup::Miss`]; an entry written at time `T` is still served at
    /// `T + TTL` and gone at the first read after that.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on storage failure.
    pub fn lookup(&self, url: &str) -> Result<CacheLookup, CatalogError> {
        let Some(entry) = self.read_entry(url)? else {
            return Ok(CacheLookup::Miss);
        };

        let age_ms = Utc::now().timestamp_millis() - entry.fetched_at_ms;
        if age_ms > self.ttl_ms {
            self.remove(url)?;
            return Ok(CacheLookup::Miss);
        }

        Ok(match entry.data_url {
            Some(data_url) => CacheLookup::Hit(data_url),
            None => CacheLookup::Negative,
        })
    }

    /// Stores a data URL for a source URL.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on storage failure.
    pub fn put(&self, url: &str, data_url: &str) -> Result<(), CatalogError> {
        self.write_entry(url, Some(data_url.to_owned()), Utc::now().timestamp_millis())
    }

    /// Records a failed fetch so the URL is not retried until the entry
    /// expires.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on storage failure.
    pub fn put_negative(&self, url: &str) -> Result<(), CatalogError> {
        self.write_entry(url, None, Utc::now().timestamp_millis())
    }

    /// Deletes every expired entry and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Store`] on storage failure.
    pub fn prune_expired(&self) -> Result<usize, CatalogError> {
        let now = Utc::now().timestamp_millis();
        let txn = self.db.begin_write().map_err(redb::Error::from)?;
        let removed;
        {
            let mut table = txn.open_table(IMAGES).map_err(redb::Error::from)?;

            let mut expired = Vec::new();
            for item in table.iter().map_err(redb::Error::from)? {
                let (key, value) = item.map_err(redb::Error::from)?;
                match serde_json::from_slice::<CacheEntry>(value.value()) {
                    Ok(entry) if now - entry.fetched_at_ms <= self.ttl_ms => {}
                    // Expired or unreadable entries both go.
                    _ => expired.push(key.value().to_owned()),
                }
            }

            removed = expired.len();
            for key in &expired {
                table.remove(key.as_str()).map_err(redb::Error::from)?;
            }
        }
        txn.commit().map_err(redb::Error::from)?;
        Ok(removed)
    }

    /// Fetches and caches every product image on the page that has no entry
    /// yet. Fetch failures become negative entries; existing entries
    /// (positive or negative) are skipped. At most `concurrency` fetches run
    /// at a time.
    pub async fn ensure_for_page(
        &self,
        client: &reqwest::Client,
        products: &[Product],
        concurrency: usize,
    ) -> EnsureStats {
        let mut stats = EnsureStats::default();

        let mut pending = Vec::new();
        for product in products {
            if product.image_url.is_empty() {
                continue;
            }
            match self.lookup(&product.image_url) {
                Ok(CacheLookup::Miss) => pending.push(product.image_url.clone()),
                Ok(_) => stats.skipped += 1,
                Err(e) => {
                    tracing::warn!(error = %e, url = %product.image_url, "image cache lookup failed");
                }
            }
        }
        pending.sort();
        pending.dedup();

        let results: Vec<(String, Result<String, CatalogError>)> = stream::iter(pending)
            .map(|url| async move {
                let fetched = fetch_data_url(client, &url).await;
                (url, fetched)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        for (url, fetched) in results {
            match fetched {
                Ok(data_url) => match self.put(&url, &data_url) {
                    Ok(()) => stats.fetched += 1,
                    Err(e) => tracing::warn!(error = %e, url = %url, "image cache write failed"),
                },
                Err(e) => {
                    tracing::debug!(error = %e, url = %url, "image fetch failed; caching negative entry");
                    if let Err(e) = self.put_negative(&url) {
                        tracing::warn!(error = %e, url = %url, "negative cache write failed");
                    }
                    stats.failed += 1;
                }
            }
        }

        stats
    }

    fn read_entry(&self, url: &str) -> Result<Option<CacheEntry>, CatalogError> {
        let txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = txn.open_table(IMAGES).map_err(redb::Error::from)?;
        match table.get(url).map_err(redb::Error::from)? {
            Some(guard) => {
                let entry = serde_json::from_slice::<CacheEntry>(guard.value()).map_err(|e| {
                    CatalogError::Deserialize {
                        context: format!("image cache entry for {url}"),
                        source: e,
                    }
                })?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    fn write_entry(
        &self,
        url: &str,
        data_url: Option<String>,
        fetched_at_ms: i64,
    ) -> Result<(), CatalogError> {
        let entry = CacheEntry {
            data_url,
            fetched_at_ms,
        };
        let bytes = serde_json::to_vec(&entry).map_err(|e| CatalogError::Serialize {
            context: format!("image cache entry for {url}"),
            source: e,
        })?;

        let txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = txn.open_table(IMAGES).map_err(redb::Error::from)?;
            table
                .insert(url, bytes.as_slice())
                .map_err(redb::Error::from)?;
        }
        txn.commit().map_err(redb::Error::from)?;
        Ok(())
    }

    fn remove(&self, url: &str) -> Result<(), CatalogError> {
        let txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = txn.open_table(IMAGES).map_err(redb::Error::from)?;
            table.remove(url).map_err(redb::Error::from)?;
        }
        txn.commit().map_err(redb::Error::from)?;
        Ok(())
    }

    /// Test hook: write an entry with an explicit timestamp so TTL
    /// boundaries can be exercised without sleeping.
    #[cfg(test)]
    fn put_at(
        &self,
        url: &str,
        data_url: Option<String>,
        fetched_at_ms: i64,
    ) -> Result<(), CatalogError> {
        self.write_entry(url, data_url, fetched_at_ms)
    }
}

/// Fetches an image and encodes it as a `data:` URL, using the response
/// `Content-Type` (falling back to `application/octet-stream`).
async fn fetch_data_url(client: &reqwest::Client, url: &str) -> Result<String, CatalogError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_owned();
    let bytes = response.bytes().await?;

    Ok(format!("data:{content_type};base64,{}", BASE64.encode(&bytes)))
}
