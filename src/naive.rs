//! Reference matcher used to cross-check the bit-parallel scanner. Not part
//! of the compiled-matcher API; exists purely for differential testing and
//! the `--compare-naive` CLI flag.

use crate::sink::MatchSink;
use crate::types::MatchRecord;

/// Find every occurrence of every pattern in `buf` by direct byte
/// comparison, returning matches sorted by `(start, pattern_id)`.
///
/// `patterns` pairs each pattern's bytes with its caller-assigned id, same
/// as [`crate::compiler::compile`].
pub fn naive_scan(patterns: &[(u32, Vec<u8>)], buf: &[u8]) -> Vec<MatchRecord> {
    let mut sink = MatchSink::with_capacity(16);
    for (pattern_id, pattern) in patterns {
        if pattern.is_empty() {
            continue;
        }
        if pattern.len() > buf.len() {
            continue;
        }
        for (start, window) in buf.windows(pattern.len()).enumerate() {
            if window == pattern.as_slice() {
                sink.push(start as u64, *pattern_id);
            }
        }
    }
    sink.into_sorted()
}
