pub mod catalog;
pub mod filter;
pub mod matcher;
pub mod normalize;
pub mod ordering;
pub mod paginate;
pub mod state;

mod app_config;
mod config;

pub use app_config::{AppConfig, Environment};
pub use catalog::{Category, Product};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{parse_price, PriceFilter};
pub use paginate::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use state::SearchState;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown price filter token: {0}")]
    UnknownPriceFilter(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
