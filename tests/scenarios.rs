use fdrmatch::compiler::{compile, Strategy};
use fdrmatch::scanner::scan;

fn run(patterns: &[&[u8]], buf: &[u8]) -> Vec<(u64, u32)> {
    let p: Vec<(u32, Vec<u8>)> = patterns
        .iter()
        .enumerate()
        .map(|(i, b)| (i as u32, b.to_vec()))
        .collect();
    let compiled = compile(&p, 9, Strategy::ByLength).unwrap();
    scan(&compiled, buf)
        .into_iter()
        .map(|m| (m.start, m.pattern_id))
        .collect()
}

#[test]
fn s1_two_overlapping_length_classes() {
    assert_eq!(
        run(&[b"abc", b"bcd"], b"abcdabc"),
        vec![(0, 0), (1, 1), (4, 0)]
    );
}

#[test]
fn s2_overlapping_repeats() {
    assert_eq!(run(&[b"aa"], b"aaaa"), vec![(0, 0), (1, 0), (2, 0)]);
}

#[test]
fn s3_prefix_chain_all_lengths() {
    assert_eq!(
        run(&[b"x", b"xy", b"xyz", b"xyzw"], b"xyzw"),
        vec![(0, 0), (0, 1), (0, 2), (0, 3), (1, 0), (2, 0), (3, 0)]
    );
}

#[test]
fn s4_http_method_prefixes() {
    assert_eq!(
        run(&[b"GET ", b"POST"], b"GET /index POST /x"),
        vec![(0, 0), (11, 1)]
    );
}

#[test]
fn s5_length_eight_pattern_crosses_chunk_boundary() {
    assert_eq!(run(&[b"abcdefgh"], b"_abcdefgh_"), vec![(1, 0)]);
}

#[test]
fn s6_two_length_two_patterns() {
    assert_eq!(run(&[b"ab", b"bc"], b"abc"), vec![(0, 0), (1, 1)]);
}

#[test]
fn boundary_empty_buffer() {
    assert_eq!(run(&[b"abc"], b""), vec![]);
}

#[test]
fn boundary_buffer_shorter_than_shortest_pattern() {
    assert_eq!(run(&[b"abcdef"], b"ab"), vec![]);
}

#[test]
fn boundary_pattern_equals_buffer() {
    assert_eq!(run(&[b"hello"], b"hello"), vec![(0, 0)]);
}

#[test]
fn boundary_straddles_multiple_chunk_boundaries() {
    // 8-byte chunks; place an 8-byte pattern at offset 12, which straddles
    // the chunk boundary at 16 (spans steps [8,16) and [16,24)).
    let buf = b"0123456789ABabcdefghZZZZ";
    assert_eq!(run(&[b"abcdefgh"], buf), vec![(12, 0)]);
}
