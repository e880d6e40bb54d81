use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://www.free-work.com/api/job_postings";
pub const DEFAULT_DETAIL_BASE_URL: &str = "https://www.free-work.com/fr/tech-it";
pub const DEFAULT_PAGE_SIZE: u32 = 300;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; parsing is decoupled from the process
/// environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("FWDASH_ENV", "development"))?;
    let bind_addr = parse_addr("FWDASH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("FWDASH_LOG_LEVEL", "info");
    let api_base_url = or_default("FWDASH_API_BASE_URL", DEFAULT_API_BASE_URL);
    let detail_base_url = or_default("FWDASH_DETAIL_BASE_URL", DEFAULT_DETAIL_BASE_URL);

    let page_size = parse_u32("FWDASH_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())?;
    if page_size == 0 {
        return Err(invalid("FWDASH_PAGE_SIZE", "must be at least 1".to_string()));
    }

    let max_concurrent_pages = parse_usize("FWDASH_MAX_CONCURRENT_PAGES", "10")?.max(1);
    let request_timeout_secs = parse_u64("FWDASH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("FWDASH_USER_AGENT", "fwdash/0.1 (mission-dashboard)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        api_base_url,
        detail_base_url,
        page_size,
        max_concurrent_pages,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FWDASH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
