//! Crawler module for page fetching and character counting
//!
//! This module contains the core traversal logic, including:
//! - HTTP fetching behind the `Fetch` trait
//! - Anchor extraction and child-link filtering
//! - The depth-bounded traversal feeding the frequency counter

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{CrawlReport, Crawler, Visit, VisitRecord};
pub use fetcher::{build_http_client, fetch_url, Fetch, FetchResult, HttpFetcher};
pub use parser::{child_url, extract_child_links, extract_hrefs, is_followable};

use crate::config::ScraperConfig;
use crate::ScraperError;

/// Runs a complete crawl operation
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the HTTP client from the configuration
/// 2. Traverse from the root URL up to the configured depth
/// 3. Finalize the frequency counter
///
/// # Arguments
///
/// * `config` - The validated scraper configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Traversal ran (possibly cut short by the deadline)
/// * `Err(ScraperError)` - The HTTP client could not be built
pub async fn crawl(config: &ScraperConfig) -> Result<CrawlReport, ScraperError> {
    let crawler = Crawler::from_config(config)?;
    Ok(crawler.run(&config.root_url, config.search_depth).await)
}
