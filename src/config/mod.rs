//! Configuration module for the scraper
//!
//! Settings come from an optional TOML file and command-line flags, are
//! layered with flags taking precedence, and are validated once before the
//! traversal starts.
//!
//! # Example
//!
//! ```no_run
//! use kanji_kana_scraper::config::{resolve_config, RawConfig};
//!
//! let config = resolve_config(None, RawConfig::default()).unwrap();
//! println!("Crawling {} to depth {}", config.root_url, config.search_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ConfigFile, RawConfig, ScraperConfig, DEFAULT_RANKING_SIZE, DEFAULT_SEARCH_DEPTH, DEFAULT_URL,
    MAX_SEARCH_DEPTH,
};

// Re-export parser functions
pub use parser::{load_config, parse_config, resolve_config};
pub use validation::{is_valid_root_url, validate};
