//! End-to-end properties of the extraction → tokenizer/digest → result
//! pipeline.

use proptest::prelude::*;

use crate::{
    analysis::{AnalysisError, Analyzer, SizePolicy},
    extract::{ExtractorConfig, TextExtractor},
};

/// A small regulation-shaped document with sections, nesting, entities and
/// uneven whitespace.
fn sample_title() -> String {
    let mut xml = String::from("<title><chapter>");
    for part in 1..=8 {
        xml.push_str(&format!(
            "<part n=\"{part}\"><heading>Part {part} Requirements</heading>\
             <section>\n  Each operator shall comply with part {part}. \
             Exceptions require written approval!  </section>\
             <section>Records &amp; reports must be retained. Why? Because the \
             administrator says so.</section></part>"
        ));
    }
    xml.push_str("</chapter></title>");
    xml
}

fn analyse_with_threshold(xml: &str, fragment_threshold: usize) -> crate::analysis::AnalysisResult {
    Analyzer::new()
        .with_fragment_threshold(fragment_threshold)
        .analyse_document(xml)
        .expect("analysis failed")
}

fn extracted_text(xml: &str) -> String {
    let mut extractor = TextExtractor::with_config(
        xml.as_bytes(),
        ExtractorConfig {
            fragment_threshold: usize::MAX,
        },
    );

    let mut text = String::new();
    while let Some(fragment) = extractor.next_fragment().expect("extraction failed") {
        text.push_str(&fragment);
    }
    text
}

#[test]
fn checksum_equals_hash_of_whole_extracted_text_at_any_threshold() {
    let xml = sample_title();
    let expected = hex::encode(blake3::hash(extracted_text(&xml).as_bytes()).as_bytes());

    for fragment_threshold in [10, 100, 1_000, usize::MAX] {
        let result = analyse_with_threshold(&xml, fragment_threshold);
        assert_eq!(result.checksum, expected, "threshold {fragment_threshold}");
    }
}

#[test]
fn counts_are_invariant_under_fragment_threshold() {
    let xml = sample_title();

    let coarse = analyse_with_threshold(&xml, usize::MAX);
    for fragment_threshold in [10, 100, 1_000] {
        let fine = analyse_with_threshold(&xml, fragment_threshold);
        assert_eq!(fine, coarse, "threshold {fragment_threshold}");
    }
}

#[test]
fn repeated_analysis_is_deterministic() {
    let xml = sample_title();

    let first = analyse_with_threshold(&xml, 100);
    let second = analyse_with_threshold(&xml, 100);

    assert_eq!(first, second);
}

#[cfg(not(feature = "strict"))]
#[test]
fn damaged_markup_still_produces_a_result() {
    let xml = "<title><section>All operators must comply.</wrong>\
               <section>Reports are due monthly.</section></title>";

    let result = Analyzer::new().analyse_document(xml).unwrap();

    assert!(result.word_count >= 4);
    assert!(result.sentence_count >= 1);
}

#[test]
fn one_oversized_document_does_not_poison_a_batch() {
    let documents = [
        "<doc><p>First title text.</p></doc>",
        "<doc><p>This one is far too large to admit.</p></doc>",
        "<doc><p>Third title text.</p></doc>",
    ];

    let mut analyzer = Analyzer::new().with_size_policy(SizePolicy { max_bytes: 40 });

    let mut analysed = 0;
    let mut skipped = 0;
    for xml in documents {
        match analyzer.analyse_document(xml) {
            Ok(result) => {
                assert_eq!(result.word_count, 3);
                analysed += 1;
            }
            Err(AnalysisError::InputTooLarge { size, max_bytes }) => {
                assert_eq!(size, documents[1].len());
                assert_eq!(max_bytes, 40);
                skipped += 1;
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(analysed, 2);
    assert_eq!(skipped, 1);
}

fn document_from_words(words: &[String]) -> String {
    let mut xml = String::from("<title><chapter>");
    for chunk in words.chunks(5) {
        xml.push_str("<p>");
        xml.push_str(&chunk.join(" "));
        xml.push_str("</p>");
    }
    xml.push_str("</chapter></title>");
    xml
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        ..ProptestConfig::default()
    })]
    #[test]
    fn pipeline_is_threshold_invariant(
        words in proptest::collection::vec("[a-zA-Z]{1,8}(\\.|!|\\?)?", 0..60),
        fragment_threshold in 1usize..256,
    ) {
        let xml = document_from_words(&words);

        let fine = analyse_with_threshold(&xml, fragment_threshold);
        let coarse = analyse_with_threshold(&xml, usize::MAX);

        prop_assert_eq!(&fine, &coarse);
        prop_assert_eq!(fine.word_count, words.len() as u64);
        prop_assert!(fine.unique_word_count <= fine.word_count);
    }
}
