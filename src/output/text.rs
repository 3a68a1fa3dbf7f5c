//! Plain-text report
//!
//! Prints the overall totals, then each class's unique count followed by a
//! grid of its most common characters.

use crate::crawler::CrawlReport;
use crate::output::traits::{class_ranking, ClassRanking, OutputHandler, OutputResult};
use crate::script::ScriptClass;
use std::io::Write;

/// Minimum number of columns in a ranking grid
const MIN_COLUMNS: usize = 5;

/// Human-readable console report
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOutput;

impl OutputHandler for TextOutput {
    fn write_report(
        &self,
        report: &CrawlReport,
        ranking_size: usize,
        out: &mut dyn Write,
    ) -> OutputResult<()> {
        let summary = &report.summary;

        if !report.completed {
            writeln!(
                out,
                "Crawl stopped at its deadline; counts are partial ({} pages fetched)",
                report.pages_fetched()
            )?;
        }

        writeln!(
            out,
            "All Japanese characters found: {}",
            summary.total_classified_count
        )?;
        writeln!(out, "Unique characters: {}", summary.unique_count)?;

        write_class(out, &class_ranking(&report.counter, ScriptClass::Kanji, ranking_size))?;

        writeln!(out, "Kana unique count: {}", summary.kana_unique_count)?;
        write_class(
            out,
            &class_ranking(&report.counter, ScriptClass::Katakana, ranking_size),
        )?;
        write_class(
            out,
            &class_ranking(&report.counter, ScriptClass::Hiragana, ranking_size),
        )?;

        Ok(())
    }
}

fn write_class(out: &mut dyn Write, ranking: &ClassRanking) -> OutputResult<()> {
    writeln!(
        out,
        "{} unique count: {}",
        ranking.class, ranking.unique_count
    )?;

    if ranking.unique_count == 0 {
        return Ok(());
    }

    writeln!(
        out,
        "{} most common {} characters:",
        ranking.entries.len(),
        ranking.class
    )?;
    write_grid(out, ranking)
}

/// Lays entries out `max(5, sqrt(n))` per line
fn write_grid(out: &mut dyn Write, ranking: &ClassRanking) -> OutputResult<()> {
    let columns = grid_columns(ranking.entries.len());

    for (i, entry) in ranking.entries.iter().enumerate() {
        if i > 0 && i % columns == 0 {
            writeln!(out)?;
        }
        match &entry.romaji {
            Some(romaji) => write!(
                out,
                "{:4}. {} [{}] ({})\t",
                entry.rank, entry.character, romaji, entry.count
            )?,
            None => write!(
                out,
                "{:4}. {} ({})\t",
                entry.rank, entry.character, entry.count
            )?,
        }
    }
    writeln!(out)?;

    Ok(())
}

fn grid_columns(entries: usize) -> usize {
    MIN_COLUMNS.max((entries as f64).sqrt() as usize)
}
