//! Frequency module for character tallies and rankings
//!
//! This module contains:
//! - The per-class frequency counter fed by the crawler
//! - The ranker that orders a class's characters by occurrence

mod counter;
mod ranker;

pub use counter::{FrequencyCounter, FrequencyMap, FrequencySummary};
pub use ranker::{rank, top, RankedCharacter};
