use memchr::memchr3_iter;

/// Count maximal runs of sentence-terminator characters (`.`, `!`, `?`) in `text`.
///
/// A run of consecutive terminators (e.g. `?!` or `...`) counts as a single
/// sentence boundary. Counting is stateless per call: callers that feed text
/// in pieces get independent per-piece counts.
pub fn count_terminator_runs(text: &str) -> u64 {
    if cfg!(feature = "optimized-str") {
        count_terminator_runs_memchr(text)
    } else {
        count_terminator_runs_naive(text)
    }
}

#[doc(hidden)] /* only public for benchmarking */
pub fn count_terminator_runs_naive(text: &str) -> u64 {
    let mut runs = 0;
    let mut in_run = false;
    for byte in text.bytes() {
        let terminator = matches!(byte, b'.' | b'!' | b'?');
        if terminator && !in_run {
            runs += 1;
        }
        in_run = terminator;
    }
    runs
}

#[doc(hidden)] /* only public for benchmarking */
pub fn count_terminator_runs_memchr(text: &str) -> u64 {
    // all three terminators are ASCII, so adjacency of byte positions is
    // adjacency of characters
    let mut runs = 0;
    let mut previous: Option<usize> = None;
    for position in memchr3_iter(b'.', b'!', b'?', text.as_bytes()) {
        if previous.map_or(true, |p| position != p + 1) {
            runs += 1;
        }
        previous = Some(position);
    }
    runs
}

pub fn to_lowercase(input: &str) -> String {
    if cfg!(feature = "optimized-str") {
        to_lowercase_opt(input)
    } else {
        // for languages that have very little unicode (so basically: english), this is probably faster
        input.to_lowercase()
    }
}

#[doc(hidden)] /* only public for benchmarking */
pub fn to_lowercase_opt(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for c in input.chars() {
        match unicode_case_mapping::to_lowercase(c) {
            [0, 0] => result.push(c),
            [l, 0] => result.push(char::from_u32(l).unwrap()),
            [l, l2] => {
                result.push(char::from_u32(l).unwrap());
                result.push(char::from_u32(l2).unwrap());
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_count_terminator_runs() {
        assert_eq!(count_terminator_runs_naive(""), 0);
        assert_eq!(count_terminator_runs_naive("no terminators here"), 0);
        assert_eq!(count_terminator_runs_naive("one sentence."), 1);
        assert_eq!(count_terminator_runs_naive("one. two! three?"), 3);
        // a run of terminators is a single boundary
        assert_eq!(count_terminator_runs_naive("what?! no..."), 2);
        assert_eq!(count_terminator_runs_naive("?!."), 1);
        // runs separated by anything count separately
        assert_eq!(count_terminator_runs_naive(". ."), 2);
    }

    #[test]
    fn test_count_terminator_runs_at_string_boundaries() {
        assert_eq!(count_terminator_runs_naive("."), 1);
        assert_eq!(count_terminator_runs_naive(".start and end."), 2);
        assert_eq!(count_terminator_runs_memchr("."), 1);
        assert_eq!(count_terminator_runs_memchr(".start and end."), 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 10000,
            ..ProptestConfig::default()
        })]
        #[test]
        fn compare_count_terminator_runs_memchr(input in "(\\.|!|\\?| |\n|[a-zA-Z]|§|.|.|.)*") {
            let expected = count_terminator_runs_naive(&input);
            let result_memchr = count_terminator_runs_memchr(&input);

            prop_assert_eq!(expected, result_memchr);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 10000,
            ..ProptestConfig::default()
        })]
        #[test]
        // restricted to ASCII: `str::to_lowercase` applies context rules
        // (Greek final sigma) that the per-char mapping does not
        fn compare_to_lowercase_opt(input in "[ -~]*") {
            let expected = input.to_lowercase();
            let result_opt = to_lowercase_opt(&input);

            prop_assert_eq!(expected, result_opt);
        }
    }
}
