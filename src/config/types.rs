use serde::Deserialize;
use std::time::Duration;

/// Site crawled when the configured root URL is missing or malformed
pub const DEFAULT_URL: &str = "https://www.yomiuri.co.jp";

/// Link hops followed from the root when none is configured
pub const DEFAULT_SEARCH_DEPTH: i64 = 1;

/// Exclusive upper bound on the search depth
pub const MAX_SEARCH_DEPTH: i64 = 10;

/// Entries printed per class when none is configured
pub const DEFAULT_RANKING_SIZE: usize = 100;

/// Fetches in flight at once; 1 keeps the traversal sequential
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 1;

/// Upper bound on the fetch worker pool
pub const MAX_CONCURRENT_FETCHES: usize = 64;

/// Per-request HTTP timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Layout of a TOML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub scraper: RawConfig,
}

/// Unvalidated settings, as read from a file or the command line
///
/// Every field is optional so that several sources can be layered.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    /// Page the traversal starts from
    pub root_url: Option<String>,

    /// Link hops followed from the root page
    pub search_depth: Option<i64>,

    /// Entries printed per class
    pub ranking_size: Option<usize>,

    /// Deadline for the whole traversal, in seconds
    pub timeout_secs: Option<u64>,

    /// Width of the fetch worker pool
    pub max_concurrent_fetches: Option<usize>,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,

    /// Per-request HTTP timeout, in seconds
    pub request_timeout_secs: Option<u64>,
}

impl RawConfig {
    /// Layers `other` on top of `self`; values set in `other` win
    pub fn overlay(self, other: RawConfig) -> RawConfig {
        RawConfig {
            root_url: other.root_url.or(self.root_url),
            search_depth: other.search_depth.or(self.search_depth),
            ranking_size: other.ranking_size.or(self.ranking_size),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            max_concurrent_fetches: other.max_concurrent_fetches.or(self.max_concurrent_fetches),
            user_agent: other.user_agent.or(self.user_agent),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
        }
    }
}

/// Validated traversal and report settings
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Page the traversal starts from
    pub root_url: String,

    /// Link hops followed from the root page, in `[0, MAX_SEARCH_DEPTH)`
    pub search_depth: u32,

    /// Entries printed per class
    pub ranking_size: usize,

    /// Deadline for the whole traversal; `None` runs to completion
    pub timeout: Option<Duration>,

    /// Width of the fetch worker pool
    pub max_concurrent_fetches: usize,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_URL.to_string(),
            search_depth: DEFAULT_SEARCH_DEPTH as u32,
            ranking_size: DEFAULT_RANKING_SIZE,
            timeout: None,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            user_agent: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}
