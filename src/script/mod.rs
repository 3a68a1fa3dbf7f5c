//! Script classification for Japanese characters
//!
//! This module decides which of the three counted scripts a character belongs
//! to. Classification is exposed as one predicate per class so that counting
//! code can consult each class independently.

pub mod romaji;

pub use romaji::romanize;

use serde::Serialize;
use std::fmt;
use wana_kana::IsJapaneseStr;

/// The script classes tallied by the frequency counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptClass {
    /// Logographic characters (Unicode Han script)
    Kanji,

    /// Cursive syllabary
    Hiragana,

    /// Angular syllabary, mostly used for loanwords
    Katakana,
}

impl ScriptClass {
    /// All classes in report order
    pub const ALL: [ScriptClass; 3] = [Self::Kanji, Self::Hiragana, Self::Katakana];

    /// Returns true for the two kana syllabaries
    pub fn is_kana(&self) -> bool {
        matches!(self, Self::Hiragana | Self::Katakana)
    }

    /// Human readable name used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kanji => "Kanji",
            Self::Hiragana => "Hiragana",
            Self::Katakana => "Katakana",
        }
    }
}

impl fmt::Display for ScriptClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Decides class membership for single characters
///
/// Each class is queried on its own. Implementations are free to return true
/// for more than one class; callers must not assume the classes are disjoint.
pub trait Classifier: Send + Sync {
    /// Returns true if `c` belongs to `class`
    fn is_class(&self, c: char, class: ScriptClass) -> bool;

    /// Returns the first class in report order that `c` belongs to
    fn classify(&self, c: char) -> Option<ScriptClass> {
        ScriptClass::ALL
            .into_iter()
            .find(|class| self.is_class(c, *class))
    }
}

/// Marks shared by both syllabaries, which are not counted as either
const SHARED_KANA_MARKS: [char; 2] = ['ー', '・'];

/// Classifier backed by `wana_kana`'s Kanji, Hiragana and Katakana ranges
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeClassifier;

impl Classifier for UnicodeClassifier {
    fn is_class(&self, c: char, class: ScriptClass) -> bool {
        match class {
            ScriptClass::Kanji => is_kanji(c),
            ScriptClass::Hiragana => is_hiragana(c),
            ScriptClass::Katakana => is_katakana(c),
        }
    }
}

/// Runs a `wana_kana` string predicate over a single character
fn check(c: char, predicate: fn(&str) -> bool) -> bool {
    let mut buffer = [0u8; 4];
    predicate(c.encode_utf8(&mut buffer))
}

/// Returns true if `c` is a Kanji
pub fn is_kanji(c: char) -> bool {
    check(c, |s| s.is_kanji())
}

/// Returns true if `c` is a Hiragana syllable
///
/// The prolonged sound mark `ー` is not counted.
pub fn is_hiragana(c: char) -> bool {
    !SHARED_KANA_MARKS.contains(&c) && check(c, |s| s.is_hiragana())
}

/// Returns true if `c` is a Katakana syllable
///
/// The prolonged sound mark `ー` and the middle dot `・` are not counted.
pub fn is_katakana(c: char) -> bool {
    !SHARED_KANA_MARKS.contains(&c) && check(c, |s| s.is_katakana())
}
