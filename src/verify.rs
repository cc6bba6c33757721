//! Exact byte-comparison pass that disambiguates scanner candidates.

use crate::compiler::Bucket;
use crate::sink::MatchSink;

/// Compare every pattern in `bucket` against `buf[start..start+len]` and
/// push a match into `sink` for each exact match.
///
/// The scanner is exact over super-characters but conflates patterns that
/// happen to share every pairwise super-character; this is the
/// disambiguation step.
pub fn verify_bucket(bucket: &Bucket, buf: &[u8], start: u64, sink: &mut MatchSink) {
    let len = bucket.canonical_len;
    if len == 0 {
        return;
    }
    let start_usize = start as usize;
    let Some(end) = start_usize.checked_add(len) else {
        return;
    };
    if end > buf.len() {
        return;
    }
    let window = &buf[start_usize..end];
    for entry in &bucket.patterns {
        if entry.bytes.as_slice() == window {
            sink.push(start, entry.pattern_id);
        }
    }
}
