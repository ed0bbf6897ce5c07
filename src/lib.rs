// SPDX-License-Identifier: MPL-2.0
//! # regtext
//!
//! Streaming text-complexity analysis for U.S. federal regulation XML.
//!
//! ## Overview
//!
//! `regtext` turns very large XML documents (eCFR title exports run to ~156M
//! characters) into aggregate complexity metrics — word count, sentence
//! count, vocabulary diversity, a composite complexity index and a content
//! checksum — without ever holding the extracted text in memory at once.
//! The XML is parsed event-by-event, plain text is accumulated into bounded
//! fragments (tens of kilobytes), and every fragment is fed in order to a
//! running tokenizer and a running blake3 digest. Peak memory is the parser's
//! event buffer, one fragment, and the unique-word set.
//!
//! **Key properties:**
//!
//! - **Bounded memory**: fragment size and the parse buffer are fixed;
//!   only the unique-word set grows, and with vocabulary rather than
//!   document length.
//! - **Best-effort robustness**: malformed markup is logged and skipped,
//!   never fatal — the upstream data source needs text recovery, not
//!   well-formedness validation.
//! - **Stable checksums**: the incremental digest equals hashing the full
//!   extracted text, regardless of the fragment threshold, so two fetches
//!   of the same document can be compared cheaply.
//! - **Hard admission control**: documents over the configured size ceiling
//!   are rejected before any parsing work begins.
//!
//! ## Basic Usage
//!
//! ```rust
//! use regtext::analysis::{Analyzer, AnalysisError};
//!
//! fn main() -> Result<(), AnalysisError> {
//!     let mut analyzer = Analyzer::new();
//!     let result = analyzer.analyse_document("<doc><p>The cat sat. The cat ran!</p></doc>")?;
//!
//!     assert_eq!(result.word_count, 6);
//!     assert_eq!(result.sentence_count, 2);
//!     println!("complexity index: {:.3}", result.complexity_index);
//!     Ok(())
//! }
//! ```
//!
//! ## Processing a Batch of Titles
//!
//! A single document's failure must never abort a batch: surface the skip
//! and keep going.
//!
//! ```rust,no_run
//! use regtext::analysis::Analyzer;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut analyzer = Analyzer::new();
//!
//!     for path in ["title-14.xml", "title-40.xml", "title-42.xml"] {
//!         let xml = std::fs::read_to_string(path)?;
//!         match analyzer.analyse_document(&xml) {
//!             Ok(result) => println!("{path}: {} words", result.word_count),
//!             Err(error) => eprintln!("skipping {path}: {error}"),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-level Streaming
//!
//! The extractor can be driven directly when the accumulators are not
//! wanted, e.g. to pipe regulation text somewhere else:
//!
//! ```rust
//! use regtext::extract::TextExtractor;
//!
//! fn main() -> Result<(), regtext::extract::ExtractError> {
//!     let xml = "<doc><sec>Some regulation text.</sec></doc>";
//!     let mut extractor = TextExtractor::new(xml.as_bytes());
//!
//!     while let Some(fragment) = extractor.next_fragment()? {
//!         // fragments are markup-free, trimmed, space-joined text
//!         assert!(!fragment.contains('<'));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! One document's extraction, tokenization and digesting are strictly
//! sequential in fragment order. Separate documents parallelize trivially:
//! give each thread its own [`analysis::Analyzer`] — no state is shared
//! between instances.
//!
//! ## Features and Configuration
//!
//! - `strict`: abort on the first malformed-XML event instead of recovering.
//!   Intended for debugging upstream format changes, not production runs.
//! - `optimized-str`: enable the `memchr`/`unicode-case-mapping` fast paths
//!   for terminator scanning and lowercasing. The naive and optimized
//!   implementations are property-tested against each other.
//!
//! Runtime knobs live on [`analysis::Analyzer`] (size ceiling, fragment
//! threshold, memory-reclamation hook and cadence) and default to values
//! sized for full federal titles.
//!
//! ## Logging and Error Handling
//!
//! Uses the `tracing` crate. Recoverable markup damage is logged at warning
//! level with the parser position; the only hard library error in a default
//! build is the size-ceiling rejection, which carries the measured size.

pub mod analysis;
pub mod digest;
pub mod extract;
#[cfg(test)]
mod integration_tests;
pub mod stats;
pub mod utils;
