use crate::config::types::{
    RawConfig, ScraperConfig, DEFAULT_MAX_CONCURRENT_FETCHES, DEFAULT_RANKING_SIZE,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SEARCH_DEPTH, DEFAULT_URL, MAX_CONCURRENT_FETCHES,
    MAX_SEARCH_DEPTH,
};
use crate::{ConfigError, ConfigResult};
use std::time::Duration;

/// Validates raw settings and fills in defaults
///
/// An unusable root URL is replaced by [`DEFAULT_URL`] rather than rejected.
pub fn validate(raw: RawConfig) -> ConfigResult<ScraperConfig> {
    let search_depth = validate_search_depth(raw.search_depth.unwrap_or(DEFAULT_SEARCH_DEPTH))?;
    let max_concurrent_fetches = validate_concurrency(
        raw.max_concurrent_fetches
            .unwrap_or(DEFAULT_MAX_CONCURRENT_FETCHES),
    )?;
    let request_timeout = validate_request_timeout(
        raw.request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
    )?;
    let timeout = validate_timeout(raw.timeout_secs)?;
    let user_agent = validate_user_agent(raw.user_agent)?;
    let root_url = resolve_root_url(raw.root_url.as_deref());

    Ok(ScraperConfig {
        root_url,
        search_depth,
        ranking_size: raw.ranking_size.unwrap_or(DEFAULT_RANKING_SIZE),
        timeout,
        max_concurrent_fetches,
        user_agent,
        request_timeout,
    })
}

/// Loose check that a URL looks like an http(s) address with a single
/// `www.` host marker
pub fn is_valid_root_url(url: &str) -> bool {
    url.starts_with("http") && url.matches("://www.").count() == 1
}

/// Returns `url` if it passes [`is_valid_root_url`], otherwise the default
fn resolve_root_url(url: Option<&str>) -> String {
    match url {
        Some(url) if is_valid_root_url(url) => url.to_string(),
        Some(url) => {
            tracing::warn!("Invalid URL '{}', falling back to {}", url, DEFAULT_URL);
            DEFAULT_URL.to_string()
        }
        None => DEFAULT_URL.to_string(),
    }
}

/// Validates the search depth range `[0, MAX_SEARCH_DEPTH)`
fn validate_search_depth(depth: i64) -> ConfigResult<u32> {
    if depth < 0 {
        return Err(ConfigError::Validation(format!(
            "search depth must not be negative, got {}",
            depth
        )));
    }

    if depth >= MAX_SEARCH_DEPTH {
        return Err(ConfigError::Validation(format!(
            "search depth must be below {}, got {}",
            MAX_SEARCH_DEPTH, depth
        )));
    }

    Ok(depth as u32)
}

fn validate_concurrency(width: usize) -> ConfigResult<usize> {
    if width < 1 || width > MAX_CONCURRENT_FETCHES {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be between 1 and {}, got {}",
            MAX_CONCURRENT_FETCHES, width
        )));
    }
    Ok(width)
}

fn validate_request_timeout(secs: u64) -> ConfigResult<Duration> {
    if secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

/// A zero deadline would cut the traversal off before the first fetch
fn validate_timeout(secs: Option<u64>) -> ConfigResult<Option<Duration>> {
    match secs {
        Some(0) => Err(ConfigError::Validation(
            "timeout_secs must be >= 1 when set".to_string(),
        )),
        Some(secs) => Ok(Some(Duration::from_secs(secs))),
        None => Ok(None),
    }
}

fn validate_user_agent(user_agent: Option<String>) -> ConfigResult<Option<String>> {
    match user_agent {
        Some(ua) if ua.trim().is_empty() => Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        )),
        other => Ok(other),
    }
}
