//! Kanji-Kana Scraper main entry point
//!
//! This is the command-line interface for the Japanese character frequency
//! crawler.

use anyhow::Context;
use clap::Parser;
use kanji_kana_scraper::config::{resolve_config, RawConfig};
use kanji_kana_scraper::crawler::crawl;
use kanji_kana_scraper::output::print_report;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Kanji-Kana Scraper: Japanese character frequency crawler
///
/// Crawls a site from a root URL, following relative `.html` links up to
/// the given depth, and ranks the Kanji, Hiragana and Katakana characters
/// found in the pages.
#[derive(Parser, Debug)]
#[command(name = "kanji-kana-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Japanese character frequency crawler", long_about = None)]
struct Cli {
    /// Target website [default: https://www.yomiuri.co.jp]
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Search depth [default: 1]
    #[arg(long, value_name = "DEPTH", allow_negative_numbers = true)]
    depth: Option<i64>,

    /// Ranking size [default: 100]
    #[arg(long, value_name = "SIZE")]
    ranksize: Option<usize>,

    /// Optional TOML configuration file; flags override its values
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Stop the crawl after this many seconds and report partial counts
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Number of pages fetched concurrently [default: 1]
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Settings given on the command line, layered over the config file
    fn overrides(&self) -> RawConfig {
        RawConfig {
            root_url: self.url.clone(),
            search_depth: self.depth,
            ranking_size: self.ranksize,
            timeout_secs: self.timeout,
            max_concurrent_fetches: self.concurrency,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    run(&cli).await.context("kanji-kana-scraper failed")
}

async fn run(cli: &Cli) -> kanji_kana_scraper::Result<()> {
    let start = Instant::now();

    let config = resolve_config(cli.config.as_deref(), cli.overrides())?;
    tracing::info!("Search depth set to {}", config.search_depth);

    let report = crawl(&config).await?;
    print_report(&report, config.ranking_size, cli.json)?;

    tracing::info!("Total time: {:?}", start.elapsed());
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the report on stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kanji_kana_scraper=info,warn"),
            1 => EnvFilter::new("kanji_kana_scraper=debug,info"),
            2 => EnvFilter::new("kanji_kana_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
