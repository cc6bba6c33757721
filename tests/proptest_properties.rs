use fdrmatch::compiler::{compile, Strategy};
use fdrmatch::naive::naive_scan;
use fdrmatch::scanner::scan;
use proptest::prelude::*;

// Small alphabet to force super-character collisions between distinct
// patterns, exercising the verifier's disambiguation path.
fn small_byte() -> impl Strategy<Value = u8> {
    prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), Just(b'd')]
}

fn pattern_set() -> impl Strategy<Value = Vec<Vec<u8>>> {
    proptest::collection::vec(
        proptest::collection::vec(small_byte(), 1..=8),
        1..12,
    )
}

fn as_compile_input(patterns: &[Vec<u8>]) -> Vec<(u32, Vec<u8>)> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, p)| (i as u32, p.clone()))
        .collect()
}

proptest! {
    #[test]
    fn prop_scan_matches_naive(
        patterns in pattern_set(),
        buf in proptest::collection::vec(small_byte(), 0..256)
    ) {
        let compiled_patterns = as_compile_input(&patterns);
        let compiled = compile(&compiled_patterns, 9, Strategy::ByLength).unwrap();
        let scanned = scan(&compiled, &buf);
        let naive = naive_scan(&compiled_patterns, &buf);
        prop_assert_eq!(scanned, naive);
    }

    #[test]
    fn prop_scan_is_sorted_and_dedup_free(
        patterns in pattern_set(),
        buf in proptest::collection::vec(small_byte(), 0..256)
    ) {
        let compiled_patterns = as_compile_input(&patterns);
        let compiled = compile(&compiled_patterns, 9, Strategy::ByLength).unwrap();
        let scanned = scan(&compiled, &buf);

        let mut sorted = scanned.clone();
        sorted.sort();
        prop_assert_eq!(&scanned, &sorted);

        let mut dedup = scanned.clone();
        dedup.dedup();
        prop_assert_eq!(scanned.len(), dedup.len());
    }

    #[test]
    fn prop_scan_is_idempotent(
        patterns in pattern_set(),
        buf in proptest::collection::vec(small_byte(), 0..256)
    ) {
        let compiled_patterns = as_compile_input(&patterns);
        let compiled = compile(&compiled_patterns, 9, Strategy::ByLength).unwrap();
        let first = scan(&compiled, &buf);
        let second = scan(&compiled, &buf);
        prop_assert_eq!(first, second);
    }
}

// Regression test: the null-anchored AND step in the scanner's inner loop
// (ANDing mask_table[c1] with mask_table[super_char_null(byte)]) is what
// forces end-of-pattern recognition. Dropping it would let any mask entry
// that happens to clear the bucket bit elsewhere in the table produce a
// false candidate before the full pattern has actually been read.
#[test]
fn regression_null_anchored_and_required_for_single_byte_pattern() {
    let patterns = vec![(0u32, b"a".to_vec())];
    let compiled = compile(&patterns, 9, Strategy::ByLength).unwrap();
    let matches = scan(&compiled, b"xax");
    assert_eq!(
        matches.into_iter().map(|m| m.start).collect::<Vec<_>>(),
        vec![1]
    );
}
