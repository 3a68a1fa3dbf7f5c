//! Descending-frequency ranking of character counts

use crate::frequency::counter::FrequencyMap;
use serde::Serialize;
use std::cmp::Reverse;

/// One entry of a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedCharacter {
    /// 1-based position in the ranking
    pub rank: usize,

    /// The counted character
    pub character: char,

    /// Number of occurrences
    pub count: u64,
}

/// Orders every key of `counts` by descending count
///
/// Equal counts are ordered by ascending code point, so the result depends
/// only on the map contents and never on its iteration order.
pub fn rank(counts: &FrequencyMap) -> Vec<RankedCharacter> {
    let mut entries: Vec<(char, u64)> = counts.iter().map(|(c, n)| (*c, *n)).collect();
    entries.sort_unstable_by_key(|(c, n)| (Reverse(*n), *c));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (character, count))| RankedCharacter {
            rank: i + 1,
            character,
            count,
        })
        .collect()
}

/// The first `n` entries of [`rank`]
pub fn top(counts: &FrequencyMap, n: usize) -> Vec<RankedCharacter> {
    let mut ranked = rank(counts);
    ranked.truncate(n);
    ranked
}
