//! Output module for rendering crawl results
//!
//! This module handles:
//! - Ranking each script class for display
//! - The plain-text console report
//! - The JSON report

mod json;
mod text;
mod traits;

pub use json::JsonOutput;
pub use text::TextOutput;
pub use traits::{class_ranking, ClassRanking, OutputError, OutputHandler, OutputResult, RankedEntry};

use crate::crawler::CrawlReport;
use std::io::Write;

/// Writes `report` to stdout using the selected format
pub fn print_report(report: &CrawlReport, ranking_size: usize, json: bool) -> OutputResult<()> {
    let handler: Box<dyn OutputHandler> = if json {
        Box::new(JsonOutput { pretty: true })
    } else {
        Box::new(TextOutput)
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    handler.write_report(report, ranking_size, &mut out)?;
    out.flush()?;

    Ok(())
}
