use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let catalog_base_url = require("VITRINE_CATALOG_BASE_URL")?;

    let env = parse_environment(&or_default("VITRINE_ENV", "development"));
    let bind_addr = parse_addr("VITRINE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("VITRINE_LOG_LEVEL", "info");
    let page_size = parse_usize("VITRINE_PAGE_SIZE", "6")?;
    let http_timeout_secs = parse_u64("VITRINE_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("VITRINE_USER_AGENT", "vitrine/0.1 (storefront)");
    let image_cache_path = PathBuf::from(or_default(
        "VITRINE_IMAGE_CACHE_PATH",
        "./vitrine-images.redb",
    ));
    let image_ttl_secs = parse_u64("VITRINE_IMAGE_TTL_SECS", "14400")?;
    let image_fetch_concurrency = parse_usize("VITRINE_IMAGE_FETCH_CONCURRENCY", "4")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        catalog_base_url,
        page_size,
        http_timeout_secs,
        user_agent,
        image_cache_path,
        image_ttl_secs,
        image_fetch_concurrency,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
