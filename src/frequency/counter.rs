//! Per-class character frequency counter

use crate::script::{Classifier, ScriptClass, UnicodeClassifier};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Character to occurrence count mapping for one script class
pub type FrequencyMap = HashMap<char, u64>;

/// Derived counts frozen by [`FrequencyCounter::finalize`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrequencySummary {
    /// Occurrences across all classes, counted once per matching class
    pub total_classified_count: u64,

    /// Sum of distinct characters over the three classes
    pub unique_count: usize,

    /// Distinct Kanji characters
    pub kanji_unique_count: usize,

    /// Distinct Hiragana characters
    pub hiragana_unique_count: usize,

    /// Distinct Katakana characters
    pub katakana_unique_count: usize,

    /// Distinct characters in the union of Hiragana and Katakana
    pub kana_unique_count: usize,
}

impl FrequencySummary {
    /// Distinct character count for one class
    pub fn unique_for(&self, class: ScriptClass) -> usize {
        match class {
            ScriptClass::Kanji => self.kanji_unique_count,
            ScriptClass::Hiragana => self.hiragana_unique_count,
            ScriptClass::Katakana => self.katakana_unique_count,
        }
    }
}

/// Tallies Kanji, Hiragana and Katakana occurrences
///
/// The classifier is consulted once per class for every observed character.
/// A character matching several classes increments each of their maps and
/// the total once per match.
pub struct FrequencyCounter {
    classifier: Arc<dyn Classifier>,
    total_classified_count: u64,
    kanji: FrequencyMap,
    hiragana: FrequencyMap,
    katakana: FrequencyMap,
    summary: Option<FrequencySummary>,
}

impl FrequencyCounter {
    /// Creates an empty counter using the Unicode script classifier
    pub fn new() -> Self {
        Self::with_classifier(Arc::new(UnicodeClassifier))
    }

    /// Creates an empty counter using a custom classifier
    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier,
            total_classified_count: 0,
            kanji: FrequencyMap::new(),
            hiragana: FrequencyMap::new(),
            katakana: FrequencyMap::new(),
            summary: None,
        }
    }

    /// Records one character
    pub fn observe(&mut self, c: char) {
        for class in ScriptClass::ALL {
            if self.classifier.is_class(c, class) {
                *self.map_mut(class).entry(c).or_insert(0) += 1;
                self.total_classified_count += 1;
            }
        }
    }

    /// Records every character of `text` in order and returns how many
    /// class matches were counted
    pub fn observe_text(&mut self, text: &str) -> u64 {
        let before = self.total_classified_count;
        for c in text.chars() {
            self.observe(c);
        }
        self.total_classified_count - before
    }

    /// Computes the derived counts from the current maps and stores them
    ///
    /// Calling this again recomputes from whatever has been observed since.
    pub fn finalize(&mut self) -> FrequencySummary {
        let kana: HashSet<&char> = self.hiragana.keys().chain(self.katakana.keys()).collect();

        let summary = FrequencySummary {
            total_classified_count: self.total_classified_count,
            unique_count: self.kanji.len() + self.hiragana.len() + self.katakana.len(),
            kanji_unique_count: self.kanji.len(),
            hiragana_unique_count: self.hiragana.len(),
            katakana_unique_count: self.katakana.len(),
            kana_unique_count: kana.len(),
        };

        self.summary = Some(summary);
        summary
    }

    /// The counts frozen by the last `finalize` call, if any
    pub fn summary(&self) -> Option<FrequencySummary> {
        self.summary
    }

    /// Live total of class matches observed so far
    pub fn total_classified_count(&self) -> u64 {
        self.total_classified_count
    }

    /// The frequency map for one class
    pub fn counts(&self, class: ScriptClass) -> &FrequencyMap {
        match class {
            ScriptClass::Kanji => &self.kanji,
            ScriptClass::Hiragana => &self.hiragana,
            ScriptClass::Katakana => &self.katakana,
        }
    }

    /// Occurrences of `c` within `class`
    pub fn count_of(&self, class: ScriptClass, c: char) -> u64 {
        self.counts(class).get(&c).copied().unwrap_or(0)
    }

    fn map_mut(&mut self, class: ScriptClass) -> &mut FrequencyMap {
        match class {
            ScriptClass::Kanji => &mut self.kanji,
            ScriptClass::Hiragana => &mut self.hiragana,
            ScriptClass::Katakana => &mut self.katakana,
        }
    }
}

impl Default for FrequencyCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrequencyCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrequencyCounter")
            .field("total_classified_count", &self.total_classified_count)
            .field("kanji", &self.kanji.len())
            .field("hiragana", &self.hiragana.len())
            .field("katakana", &self.katakana.len())
            .field("summary", &self.summary)
            .finish()
    }
}
