//! Output handler traits and types
//!
//! This module defines the trait interface for report renderers and the
//! per-class ranking data they share.

use crate::crawler::CrawlReport;
use crate::frequency::{top, FrequencyCounter, RankedCharacter};
use crate::script::{romanize, ScriptClass};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One ranked character with its optional reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// 1-based position in the ranking
    pub rank: usize,

    /// The counted character
    pub character: char,

    /// Number of occurrences
    pub count: u64,

    /// Romaji reading for kana, `None` for Kanji
    #[serde(skip_serializing_if = "Option::is_none")]
    pub romaji: Option<String>,
}

impl From<RankedCharacter> for RankedEntry {
    fn from(ranked: RankedCharacter) -> Self {
        Self {
            rank: ranked.rank,
            character: ranked.character,
            count: ranked.count,
            romaji: romanize(ranked.character),
        }
    }
}

/// The top entries of one script class
#[derive(Debug, Clone, Serialize)]
pub struct ClassRanking {
    /// Script class ranked
    pub class: ScriptClass,

    /// Distinct characters of this class
    pub unique_count: usize,

    /// Up to `ranking_size` entries, most frequent first
    pub entries: Vec<RankedEntry>,
}

/// Ranks one class, keeping `min(unique, ranking_size)` entries
pub fn class_ranking(
    counter: &FrequencyCounter,
    class: ScriptClass,
    ranking_size: usize,
) -> ClassRanking {
    let counts = counter.counts(class);
    let entries = top(counts, ranking_size)
        .into_iter()
        .map(|ranked| {
            let mut entry = RankedEntry::from(ranked);
            if !class.is_kana() {
                entry.romaji = None;
            }
            entry
        })
        .collect();

    ClassRanking {
        class,
        unique_count: counts.len(),
        entries,
    }
}

/// Renders a finished crawl
pub trait OutputHandler {
    /// Writes `report` to `out`, listing at most `ranking_size` entries per
    /// class
    fn write_report(
        &self,
        report: &CrawlReport,
        ranking_size: usize,
        out: &mut dyn Write,
    ) -> OutputResult<()>;
}
