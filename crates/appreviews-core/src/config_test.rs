use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg, ScraperConfig::default());
    assert_eq!(cfg.locale, "en-GB");
    assert_eq!(cfg.page_size, 20);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.retry_backoff_base_secs, 3);
    assert_eq!(cfg.heartbeat_interval_secs, 5);
}

#[test]
fn build_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("APPREVIEWS_LOCALE", "en-US");
    map.insert("APPREVIEWS_PAGE_SIZE", "10");
    map.insert("APPREVIEWS_REQUEST_TIMEOUT_SECS", "5");
    map.insert("APPREVIEWS_MAX_RETRIES", "0");
    map.insert("APPREVIEWS_RETRY_BACKOFF_BASE_SECS", "1");
    map.insert("APPREVIEWS_HEARTBEAT_INTERVAL_SECS", "60");
    let cfg = build_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.locale, "en-US");
    assert_eq!(cfg.page_size, 10);
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.retry_backoff_base_secs, 1);
    assert_eq!(cfg.heartbeat_interval_secs, 60);
}

#[test]
fn build_config_fails_with_invalid_page_size() {
    let mut map = HashMap::new();
    map.insert("APPREVIEWS_PAGE_SIZE", "twenty");
    let result = build_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "APPREVIEWS_PAGE_SIZE"),
        "expected InvalidEnvVar(APPREVIEWS_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn build_config_rejects_zero_page_size() {
    let mut map = HashMap::new();
    map.insert("APPREVIEWS_PAGE_SIZE", "0");
    let result = build_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "APPREVIEWS_PAGE_SIZE"),
        "expected InvalidEnvVar(APPREVIEWS_PAGE_SIZE), got: {result:?}"
    );
}

#[test]
fn build_config_rejects_blank_locale() {
    let mut map = HashMap::new();
    map.insert("APPREVIEWS_LOCALE", "  ");
    let result = build_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "APPREVIEWS_LOCALE"),
        "expected InvalidEnvVar(APPREVIEWS_LOCALE), got: {result:?}"
    );
}

#[test]
fn build_config_fails_with_negative_retries() {
    let mut map = HashMap::new();
    map.insert("APPREVIEWS_MAX_RETRIES", "-1");
    let result = build_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "APPREVIEWS_MAX_RETRIES"),
        "expected InvalidEnvVar(APPREVIEWS_MAX_RETRIES), got: {result:?}"
    );
}
