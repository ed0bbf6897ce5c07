use std::fmt::Debug;

use crate::{
    digest::ContentDigest,
    extract::{ExtractorConfig, TextExtractor},
    stats::WordStats,
};

/// Default admission ceiling. The largest federal titles run to roughly
/// 156M characters; 200 MiB admits them with headroom while still bounding
/// worst-case work.
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 200 * 1024 * 1024;

/// Default word-count cadence for the memory-reclamation hook.
pub const DEFAULT_RECLAIM_INTERVAL_WORDS: u64 = 100_000;

/// Hard admission gate: documents larger than `max_bytes` are rejected
/// outright, never truncated or partially analysed.
#[derive(Debug, Clone, Copy)]
pub struct SizePolicy {
    pub max_bytes: usize,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("document is {size} bytes, over the {max_bytes} byte ceiling")]
    InputTooLarge { size: usize, max_bytes: usize },
    #[error("text extraction failed")]
    Extract(#[from] crate::extract::ExtractError),
}

/// The one record produced per analysed document.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AnalysisResult {
    pub word_count: u64,
    pub sentence_count: u64,
    pub average_sentence_length: f64,
    pub unique_word_count: u64,
    pub vocabulary_diversity: f64,
    /// Composite complexity score: average sentence length × vocabulary
    /// diversity.
    pub complexity_index: f64,
    /// blake3 hex digest of the extracted text, usable for change detection
    /// between fetches of the same document.
    pub checksum: String,
}

/// Drives one end-to-end document analysis.
///
/// Each call to [`analyse_document`](Analyzer::analyse_document) owns a fresh
/// accumulator pair; nothing is shared between calls, so independent
/// `Analyzer` instances may run on separate threads for separate documents.
pub struct Analyzer {
    size_policy: SizePolicy,
    extractor_config: ExtractorConfig,
    reclaim_interval_words: u64,
    reclaim_hook: Option<Box<dyn FnMut()>>,
}

impl Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("size_policy", &self.size_policy)
            .field("extractor_config", &self.extractor_config)
            .field("reclaim_interval_words", &self.reclaim_interval_words)
            .field("reclaim_hook", &self.reclaim_hook.is_some())
            .finish()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            size_policy: SizePolicy::default(),
            extractor_config: ExtractorConfig::default(),
            reclaim_interval_words: DEFAULT_RECLAIM_INTERVAL_WORDS,
            reclaim_hook: None,
        }
    }

    pub fn with_size_policy(mut self, size_policy: SizePolicy) -> Self {
        self.size_policy = size_policy;
        self
    }

    pub fn with_fragment_threshold(mut self, fragment_threshold: usize) -> Self {
        self.extractor_config.fragment_threshold = fragment_threshold;
        self
    }

    /// Inject a host-runtime memory-reclamation hint, invoked every
    /// `with_reclaim_interval` words. Without a hook the cadence is a no-op.
    pub fn with_reclaim_hook(mut self, hook: impl FnMut() + 'static) -> Self {
        self.reclaim_hook = Some(Box::new(hook));
        self
    }

    pub fn with_reclaim_interval(mut self, words: u64) -> Self {
        self.reclaim_interval_words = words.max(1);
        self
    }

    /// Analyse one XML document into its [`AnalysisResult`].
    ///
    /// The size ceiling is checked against the raw input length before any
    /// parsing work. Past the gate, extraction streams fragments into a fresh
    /// tokenizer and digest in emission order; both are finalized exactly
    /// once, after the document is fully consumed. Malformed markup inside
    /// the document is recovered by the extractor and never fails the call
    /// (unless the `strict` feature is enabled).
    pub fn analyse_document(&mut self, xml: &str) -> Result<AnalysisResult, AnalysisError> {
        let size = xml.len();
        if size > self.size_policy.max_bytes {
            return Err(AnalysisError::InputTooLarge {
                size,
                max_bytes: self.size_policy.max_bytes,
            });
        }

        let span = tracing::span!(tracing::Level::DEBUG, "analyse_document", size);
        let _enter = span.enter();

        let mut extractor =
            TextExtractor::with_config(xml.as_bytes(), self.extractor_config.clone());
        let mut stats = WordStats::new();
        let mut digest = ContentDigest::new();

        let mut next_reclaim = self.reclaim_interval_words;
        while let Some(fragment) = extractor.next_fragment()? {
            stats.consume(&fragment);
            digest.consume(&fragment);

            if let Some(hook) = self.reclaim_hook.as_mut() {
                while stats.word_count() >= next_reclaim {
                    hook();
                    next_reclaim += self.reclaim_interval_words;
                }
            }
        }

        let summary = stats.finalize();
        let checksum = digest.finalize();
        let complexity_index = summary.average_sentence_length * summary.vocabulary_diversity;

        tracing::debug!(
            word_count = summary.word_count,
            sentence_count = summary.sentence_count,
            unique_word_count = summary.unique_word_count,
            complexity_index,
            "document analysed"
        );

        Ok(AnalysisResult {
            word_count: summary.word_count,
            sentence_count: summary.sentence_count,
            average_sentence_length: summary.average_sentence_length,
            unique_word_count: summary.unique_word_count,
            vocabulary_diversity: summary.vocabulary_diversity,
            complexity_index,
            checksum,
        })
    }
}
