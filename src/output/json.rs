//! JSON report
//!
//! Emits the same totals and rankings as the text report plus crawl
//! statistics, for consumption by other tools.

use crate::crawler::{CrawlReport, VisitRecord};
use crate::frequency::FrequencySummary;
use crate::output::traits::{class_ranking, ClassRanking, OutputHandler, OutputResult};
use crate::script::ScriptClass;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Machine-readable report
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOutput {
    /// Pretty-print with indentation
    pub pretty: bool,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    root_url: &'a str,
    search_depth: u32,
    completed: bool,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    elapsed_ms: u64,
    pages_fetched: usize,
    pages_failed: usize,
    summary: FrequencySummary,
    rankings: Vec<ClassRanking>,
    visits: &'a [VisitRecord],
}

impl OutputHandler for JsonOutput {
    fn write_report(
        &self,
        report: &CrawlReport,
        ranking_size: usize,
        out: &mut dyn Write,
    ) -> OutputResult<()> {
        let json = JsonReport {
            root_url: &report.root_url,
            search_depth: report.search_depth,
            completed: report.completed,
            started_at: report.started_at,
            finished_at: report.finished_at,
            elapsed_ms: u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
            pages_fetched: report.pages_fetched(),
            pages_failed: report.pages_failed(),
            summary: report.summary,
            rankings: ScriptClass::ALL
                .into_iter()
                .map(|class| class_ranking(&report.counter, class, ranking_size))
                .collect(),
            visits: &report.visits,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &json)?;
        } else {
            serde_json::to_writer(&mut *out, &json)?;
        }
        writeln!(out)?;

        Ok(())
    }
}
