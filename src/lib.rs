//! Kanji-Kana Scraper: Japanese character frequency crawler
//!
//! This crate crawls a website from a root URL, follows relative `.html` links
//! up to a bounded depth, and tallies how often each Kanji, Hiragana and
//! Katakana character appears in the fetched pages.

pub mod config;
pub mod crawler;
pub mod frequency;
pub mod output;
pub mod script;
pub mod state;

use thiserror::Error;

/// Main error type for scraper operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::ScraperConfig;
pub use crawler::{crawl, CrawlReport, Crawler};
pub use frequency::{rank, FrequencyCounter, FrequencySummary, RankedCharacter};
pub use script::{Classifier, ScriptClass, UnicodeClassifier};
pub use state::VisitState;
