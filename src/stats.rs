use rustc_hash::FxHashSet;

use crate::utils;

/// Running word/sentence statistics over an ordered stream of text fragments.
///
/// One `WordStats` lives for exactly one document analysis: created at the
/// start, fed every fragment in emission order, consumed once by
/// [`finalize`](WordStats::finalize).
///
/// The unique-word set is the only state that grows with vocabulary size
/// rather than fragment size; everything else is a counter.
#[derive(Debug, Default)]
pub struct WordStats {
    words: u64,
    sentence_runs: u64,
    unique: FxHashSet<String>,
}

impl WordStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one fragment into the running statistics.
    ///
    /// Words are maximal non-whitespace runs, lowercased verbatim for the
    /// unique set (punctuation stays attached, so `sat.` and `sat` are
    /// distinct keys). Sentence boundaries are maximal runs of `.`, `!`, `?`,
    /// counted independently per fragment: a run that a caller splits across
    /// two fragments is counted once per fragment. That boundary bias is
    /// deliberate; re-buffering across fragments would defeat the point of
    /// consuming them one at a time.
    pub fn consume(&mut self, fragment: &str) {
        for word in fragment.split_whitespace() {
            self.words += 1;
            let key = utils::to_lowercase(word);
            self.unique.insert(key);
        }
        self.sentence_runs += utils::count_terminator_runs(fragment);
    }

    pub fn word_count(&self) -> u64 {
        self.words
    }

    pub fn sentence_runs(&self) -> u64 {
        self.sentence_runs
    }

    pub fn unique_word_count(&self) -> u64 {
        self.unique.len() as u64
    }

    /// Consume the accumulator and derive the per-document summary.
    ///
    /// The sentence count is floored to 1 so that documents without terminal
    /// punctuation still have a defined average sentence length.
    pub fn finalize(self) -> WordStatsSummary {
        let word_count = self.words;
        let sentence_count = self.sentence_runs.max(1);
        let unique_word_count = self.unique.len() as u64;

        WordStatsSummary {
            word_count,
            sentence_count,
            average_sentence_length: word_count as f64 / sentence_count as f64,
            unique_word_count,
            vocabulary_diversity: if word_count == 0 {
                0.0
            } else {
                unique_word_count as f64 / word_count as f64
            },
        }
    }
}

/// Derived statistics for one fully consumed document.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct WordStatsSummary {
    pub word_count: u64,
    pub sentence_count: u64,
    pub average_sentence_length: f64,
    pub unique_word_count: u64,
    pub vocabulary_diversity: f64,
}
