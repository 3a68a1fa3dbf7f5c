use crate::config::types::{ConfigFile, RawConfig, ScraperConfig};
use crate::config::validation::validate;
use crate::ConfigResult;
use std::path::Path;

/// Reads the `[scraper]` table of a TOML configuration file
///
/// The settings are returned unvalidated so command-line values can still be
/// layered on top before [`resolve_config`] checks them.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(RawConfig)` - Settings found in the file
/// * `Err(ConfigError)` - Failed to read or parse the file
pub fn load_config(path: &Path) -> ConfigResult<RawConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses configuration TOML from a string
pub fn parse_config(content: &str) -> ConfigResult<RawConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    Ok(file.scraper)
}

/// Builds the final configuration from an optional file and overrides
///
/// # Arguments
///
/// * `path` - Optional TOML configuration file
/// * `overrides` - Values that take precedence over the file (usually CLI flags)
///
/// # Example
///
/// ```no_run
/// use kanji_kana_scraper::config::{resolve_config, RawConfig};
/// use std::path::Path;
///
/// let overrides = RawConfig {
///     search_depth: Some(2),
///     ..Default::default()
/// };
/// let config = resolve_config(Some(Path::new("scraper.toml")), overrides).unwrap();
/// println!("Depth: {}", config.search_depth);
/// ```
pub fn resolve_config(
    path: Option<&Path>,
    overrides: RawConfig,
) -> ConfigResult<ScraperConfig> {
    let base = match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => RawConfig::default(),
    };

    validate(base.overlay(overrides))
}
