//! Pattern-set compilation: bucket assignment and mask-table construction.

use crate::bitreg::BitRegister;
use crate::error::CompileError;
use crate::superchar::{domain_size, normalize_domain_bits, super_char};

/// Number of bucket slots. Fixed by the 128-bit state register: 8 byte
/// lanes per 8-byte scan step, one bucket bit per lane.
pub const NUM_BUCKETS: usize = 8;

/// Maximum supported pattern length, in bytes.
pub const MAX_PATTERN_LEN: usize = 8;

/// How input patterns are assigned to the 8 bucket slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// bucket id = len(pattern) - 1. Default; works for any pattern length
    /// mix.
    #[default]
    ByLength,
    /// bucket id = pattern_index mod 8. Only valid when every pattern
    /// shares one length.
    Uniform,
}

/// One pattern as stored in a bucket: its bytes and its caller-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub bytes: Vec<u8>,
    pub pattern_id: u32,
}

/// One of the 8 bucket slots. Empty buckets have `canonical_len == 0`.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    pub canonical_len: usize,
    pub patterns: Vec<PatternEntry>,
}

impl Bucket {
    fn is_empty_bucket(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// The immutable artifact produced by [`compile`]: buckets plus the
/// per-super-character mask table. Safe to share across any number of
/// concurrent scanners.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub buckets: [Bucket; NUM_BUCKETS],
    pub mask_table: Vec<BitRegister>,
    pub domain_bits: u8,
}

impl Compiled {
    #[inline]
    pub fn bucket_len(&self, bucket: usize) -> usize {
        self.buckets[bucket].canonical_len
    }
}

/// Build buckets and mask table for `patterns`.
///
/// `domain_bits` is clamped into `[8, 16]` (falling back to 9 and logging a
/// warning if out of range — see [`crate::superchar::normalize_domain_bits`]).
pub fn compile(
    patterns: &[(u32, Vec<u8>)],
    domain_bits: u8,
    strategy: Strategy,
) -> Result<Compiled, CompileError> {
    if patterns.is_empty() {
        return Err(CompileError::NoPatterns);
    }
    for (index, (_, bytes)) in patterns.iter().enumerate() {
        if bytes.is_empty() || bytes.len() > MAX_PATTERN_LEN {
            return Err(CompileError::PatternTooLong {
                index,
                len: bytes.len(),
            });
        }
    }

    let d = normalize_domain_bits(domain_bits);
    log::debug!(
        "compiling {} pattern(s) with domain_bits={d}, strategy={strategy:?}",
        patterns.len()
    );

    let mut buckets: [Bucket; NUM_BUCKETS] = Default::default();

    match strategy {
        Strategy::ByLength => {
            for (index, (pattern_id, bytes)) in patterns.iter().enumerate() {
                let bucket_id = bytes.len() - 1;
                let bucket = &mut buckets[bucket_id];
                if bucket.is_empty_bucket() {
                    bucket.canonical_len = bytes.len();
                } else if bucket.canonical_len != bytes.len() {
                    return Err(CompileError::StrategyMismatch {
                        requested: strategy,
                        index,
                        len: bytes.len(),
                        bucket: bucket_id,
                    });
                }
                bucket.patterns.push(PatternEntry {
                    bytes: bytes.clone(),
                    pattern_id: *pattern_id,
                });
            }
        }
        Strategy::Uniform => {
            let uniform_len = patterns[0].1.len();
            for (index, (pattern_id, bytes)) in patterns.iter().enumerate() {
                if bytes.len() != uniform_len {
                    return Err(CompileError::StrategyMismatch {
                        requested: strategy,
                        index,
                        len: bytes.len(),
                        bucket: index % NUM_BUCKETS,
                    });
                }
                let bucket_id = index % NUM_BUCKETS;
                let bucket = &mut buckets[bucket_id];
                bucket.canonical_len = uniform_len;
                bucket.patterns.push(PatternEntry {
                    bytes: bytes.clone(),
                    pattern_id: *pattern_id,
                });
            }
        }
    }

    let mask_table = build_mask_table(&buckets, d);

    log::trace!(
        "mask table built: {} entries ({} bytes)",
        mask_table.len(),
        mask_table.len() * 16
    );

    Ok(Compiled {
        buckets,
        mask_table,
        domain_bits: d,
    })
}

fn build_mask_table(buckets: &[Bucket; NUM_BUCKETS], domain_bits: u8) -> Vec<BitRegister> {
    let size = domain_size(domain_bits);

    // Phase A: every entry starts with the low 64 bits all-ones, high 64
    // bits all-zero — "no match possible yet" in the active half.
    let init = BitRegister::new(u64::MAX as u128);
    let mut table = vec![init; size];

    // Phase B: padding lanes (positions >= canonical length) stay 0
    // regardless of the super-character read, for every non-empty bucket.
    for (b, bucket) in buckets.iter().enumerate() {
        if bucket.is_empty_bucket() {
            continue;
        }
        for entry in table.iter_mut() {
            for p in bucket.canonical_len..NUM_BUCKETS {
                entry.set_bit(false, p as u8, b as u8);
            }
        }
    }

    // Phase C: imprint each pattern's required super-characters.
    for (b, bucket) in buckets.iter().enumerate() {
        for pattern in &bucket.patterns {
            let q = &pattern.bytes;
            for pos in 0..q.len() {
                let right_pos = q.len() - 1 - pos;
                let c = super_char(q, pos, domain_bits) as usize;
                table[c].set_bit(false, right_pos as u8, b as u8);
            }
        }
    }

    table
}
