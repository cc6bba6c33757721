//! Error types for compilation and for the CLI driver.

use thiserror::Error;

/// Errors raised while turning a pattern set into a [`crate::compiler::Compiled`]
/// matcher.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("pattern {index} has length {len}, but only 1..=8 bytes are supported")]
    PatternTooLong { index: usize, len: usize },

    #[error("no patterns given to compile")]
    NoPatterns,

    #[error("strategy {requested:?} cannot place pattern {index} (length {len}) in bucket {bucket}")]
    StrategyMismatch {
        requested: crate::compiler::Strategy,
        index: usize,
        len: usize,
        bucket: usize,
    },
}

/// Top-level error type for the `fdrmatch` binary.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to compile patterns: {0}")]
    Compile(#[from] CompileError),

    #[error("json serialization failed: {0}")]
    #[cfg(feature = "cli")]
    Json(#[from] serde_json::Error),

    #[error("compare-naive mismatch: {0} discrepancies found")]
    CompareMismatch(usize),
}
