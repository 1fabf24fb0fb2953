use crate::ConfigError;

/// Tunables for the review scraper.
///
/// Defaults match the storefront's own web client: `en-GB` locale, pages of
/// 20, three attempts per page with a 3 second back-off base, and a heartbeat
/// log every 5 seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    pub locale: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
    /// Additional attempts after the first one, on 404 and 429 only.
    pub max_retries: u32,
    /// Wait before the n-th retry is `retry_backoff_base_secs * 2^(n-1)`.
    pub retry_backoff_base_secs: u64,
    pub heartbeat_interval_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            locale: "en-GB".to_owned(),
            page_size: 20,
            request_timeout_secs: 30,
            max_retries: 2,
            retry_backoff_base_secs: 3,
            heartbeat_interval_secs: 5,
        }
    }
}

/// Load scraper configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an unparsable value.
pub fn load_config() -> Result<ScraperConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load scraper configuration from environment variables already in the process.
///
/// Unlike [`load_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an unparsable value.
pub fn load_config_from_env() -> Result<ScraperConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build scraper configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain map.
fn build_config<F>(lookup: F) -> Result<ScraperConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let locale = or_default("APPREVIEWS_LOCALE", "en-GB");
    if locale.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "APPREVIEWS_LOCALE".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let page_size = parse_u32("APPREVIEWS_PAGE_SIZE", "20")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "APPREVIEWS_PAGE_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("APPREVIEWS_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("APPREVIEWS_MAX_RETRIES", "2")?;
    let retry_backoff_base_secs = parse_u64("APPREVIEWS_RETRY_BACKOFF_BASE_SECS", "3")?;
    let heartbeat_interval_secs = parse_u64("APPREVIEWS_HEARTBEAT_INTERVAL_SECS", "5")?;

    Ok(ScraperConfig {
        locale,
        page_size,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_secs,
        heartbeat_interval_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
