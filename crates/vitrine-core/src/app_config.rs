use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base URL the catalog documents are served under; the loader appends
    /// `/data/produtos.json` and `/data/categorias.json`.
    pub catalog_base_url: String,
    pub page_size: usize,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// Path of the embedded image-cache database file.
    pub image_cache_path: PathBuf,
    /// Image cache entry time-to-live in seconds.
    pub image_ttl_secs: u64,
    /// Concurrent image fetches during a page prefetch.
    pub image_fetch_concurrency: usize,
}
