//! The bit-parallel scan loop: advances a 128-bit state register 8 bytes at
//! a time over the input buffer and raises verification candidates.

use crate::bitreg::BitRegister;
use crate::compiler::{Compiled, NUM_BUCKETS};
use crate::sink::MatchSink;
use crate::superchar::{super_char, super_char_null};
use crate::types::MatchRecord;
use crate::verify::verify_bucket;

const CHUNK: usize = 8;

/// Per-scan operation counters, for benchmarking and for the CLI's
/// `-v` trace output. Not part of the core matching contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub ops_and: u64,
    pub ops_or: u64,
    pub ops_shift: u64,
    pub candidates_raised: u64,
    pub candidates_verified: u64,
}

/// Scan `buf` against `compiled`, returning matches sorted by
/// `(start, pattern_id)`.
pub fn scan(compiled: &Compiled, buf: &[u8]) -> Vec<MatchRecord> {
    let (matches, _) = scan_with_stats(compiled, buf);
    matches
}

/// Like [`scan`], but also returns the operation counters for this run.
pub fn scan_with_stats(compiled: &Compiled, buf: &[u8]) -> (Vec<MatchRecord>, ScanStats) {
    let mut stats = ScanStats::default();
    let mut sink = MatchSink::new();

    let mut state = initial_state(compiled);
    log::trace!("scan start: len={}, domain_bits={}", buf.len(), compiled.domain_bits);

    let mut i = 0usize;
    while i < buf.len() {
        let chunk_len = CHUNK.min(buf.len() - i);

        for j in 0..chunk_len {
            let c1 = super_char(buf, i + j, compiled.domain_bits) as usize;
            let c0 = super_char_null(buf[i + j], compiled.domain_bits) as usize;

            let m = compiled.mask_table[c1] & compiled.mask_table[c0];
            stats.ops_and += 1;

            state = state | (m << (j as u32 * 8));
            stats.ops_or += 1;
        }

        for p in 0..chunk_len {
            for b in 0..NUM_BUCKETS {
                if !state.get_bit(p as u8, b as u8) {
                    stats.candidates_raised += 1;
                    let bucket_len = compiled.bucket_len(b);
                    if bucket_len == 0 {
                        continue;
                    }
                    let end = p + i;
                    if end + 1 < bucket_len {
                        // Initial-state suppression and the padding-lane
                        // clears (see compiler::build_mask_table) guarantee
                        // a cleared bit never appears before a bucket's
                        // pattern could have fully been read. Reaching this
                        // branch means that invariant broke.
                        debug_assert!(
                            false,
                            "candidate end {end} in bucket {b} (len {bucket_len}) \
                             precedes a possible start; mask-table invariant violated"
                        );
                        continue;
                    }
                    let start = (end + 1 - bucket_len) as u64;
                    stats.candidates_verified += 1;
                    verify_bucket(&compiled.buckets[b], buf, start, &mut sink);
                }
            }
        }

        state = state >> 64;
        stats.ops_shift += 1;
        i += CHUNK;
    }

    let out = sink.into_sorted();
    log::debug!(
        "scan done: {} match(es), {} candidate(s) raised",
        out.len(),
        stats.candidates_raised
    );
    (out, stats)
}

fn initial_state(compiled: &Compiled) -> BitRegister {
    let mut state = BitRegister::ZERO;
    for (b, bucket) in compiled.buckets.iter().enumerate() {
        let len_b = bucket.canonical_len;
        if len_b >= 2 {
            for p in 0..=(len_b - 2) {
                state.set_bit(true, p as u8, b as u8);
            }
        }
    }
    state
}
