//! fdrmatch: a bit-parallel ("FDR"-style) multi-literal string matcher for
//! short byte patterns (1..=8 bytes).
//!
//! The crate provides:
//! - A pattern compiler (`compiler`) that builds buckets and a
//!   per-super-character mask table
//! - A scanner (`scanner`) that advances a 128-bit shift-or state register
//!   8 bytes at a time over an input buffer
//! - A verifier (`verify`) that disambiguates scanner candidates by exact
//!   byte comparison
//! - A naive reference matcher (`naive`) for differential testing
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use fdrmatch::compiler::{compile, Strategy};
//! use fdrmatch::scanner::scan;
//!
//! let patterns = vec![(0u32, b"cat".to_vec()), (1u32, b"dog".to_vec())];
//! let compiled = compile(&patterns, 9, Strategy::ByLength).unwrap();
//! let matches = scan(&compiled, b"the cat sat on the dog");
//! assert_eq!(matches.len(), 2);
//! ```

pub mod bitreg;
pub mod compiler;
pub mod error;
pub mod naive;
pub mod scanner;
pub mod sink;
pub mod superchar;
pub mod types;
pub mod verify;

#[cfg(feature = "cli")]
pub mod cli;
