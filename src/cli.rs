// Idiomatic Rust CLI for fdrmatch.
//
// Three subcommands: `scan` drives a compile+scan pass over a rulesets
// file, `bench` reports throughput, `compare` diffs two results files.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::{ArgAction, Parser, Subcommand};

use crate::compiler::{compile, Strategy};
use crate::error::DriverError;
use crate::naive::naive_scan;
use crate::scanner::scan_with_stats;
use crate::types::MatchRecord;

const DEFAULT_DOMAIN_BITS: u8 = 9;
const DEFAULT_SHOW: usize = 20;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Bit-parallel multi-literal string matcher.
#[derive(Parser, Debug)]
#[command(
    name = "fdrmatch",
    version,
    about = "Bit-parallel (FDR-style) multi-literal string matcher",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Emit stats as JSON to stderr instead of plain text.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compile patterns and scan a rulesets file, writing results.txt.
    Scan(ScanArgs),
    /// Report compile/scan throughput for a patterns + rulesets pair.
    Bench(ScanArgs),
    /// Diff two results.txt files produced by `scan`.
    Compare(CompareArgs),
}

#[derive(clap::Args, Debug)]
struct ScanArgs {
    /// Path to the patterns file (one pattern per line).
    #[arg(long)]
    patterns: PathBuf,

    /// Path to the rulesets file (one input buffer per line).
    #[arg(long)]
    rulesets: PathBuf,

    /// Output directory for metadata.txt / results.txt (required for `scan`,
    /// ignored by `bench`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Cap the number of patterns loaded (0 = no cap).
    #[arg(long = "max-patterns", default_value_t = 0)]
    max_patterns: usize,

    /// Cap the number of ruleset lines processed (0 = no cap).
    #[arg(long = "test-num", default_value_t = 0)]
    test_num: usize,

    /// Super-character domain width in bits, clamped to [8, 16].
    #[arg(long = "domain-bits", default_value_t = DEFAULT_DOMAIN_BITS)]
    domain_bits: u8,

    /// Also run the naive matcher per line and abort on the first
    /// discrepancy.
    #[arg(long = "compare-naive")]
    compare_naive: bool,
}

#[derive(clap::Args, Debug)]
struct CompareArgs {
    a: PathBuf,
    b: PathBuf,

    /// Maximum number of mismatches to print.
    #[arg(long, default_value_t = DEFAULT_SHOW)]
    show: usize,
}

// ---------------------------------------------------------------------------
// Pattern / ruleset loading
// ---------------------------------------------------------------------------

fn load_lines(path: &Path) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let mut out = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        out.push(line);
    }
    Ok(out)
}

fn load_patterns(path: &Path, max_patterns: usize) -> io::Result<Vec<(u32, Vec<u8>)>> {
    let mut lines = load_lines(path)?;
    if max_patterns > 0 && lines.len() > max_patterns {
        lines.truncate(max_patterns);
    }

    let mut patterns = Vec::with_capacity(lines.len());
    let mut filtered = 0usize;
    let mut next_id = 0u32;
    for line in lines {
        let bytes = line.into_bytes();
        if bytes.is_empty() || bytes.len() > crate::compiler::MAX_PATTERN_LEN {
            filtered += 1;
            continue;
        }
        patterns.push((next_id, bytes));
        next_id += 1;
    }

    if filtered > 0 {
        log::warn!("filtered {filtered} pattern(s) longer than 8 bytes");
    }

    Ok(patterns)
}

fn load_rulesets(path: &Path, test_num: usize) -> io::Result<Vec<String>> {
    let mut lines = load_lines(path)?;
    if test_num > 0 && lines.len() > test_num {
        lines.truncate(test_num);
    }
    Ok(lines)
}

// ---------------------------------------------------------------------------
// scan
// ---------------------------------------------------------------------------

struct RulesetResult {
    ruleset_index: usize,
    matches: Vec<MatchRecord>,
    time_ms: f64,
}

/// Scan every ruleset line against `compiled`, one call per line.
///
/// Serial by default. Under the `parallel` feature, lines are fanned out
/// across a rayon thread pool: `compiled` is read-only and `Send + Sync`
/// (see `compiler::Compiled`), so independent scans need no synchronization.
#[cfg(not(feature = "parallel"))]
fn scan_all(compiled: &crate::compiler::Compiled, rulesets: &[String]) -> Vec<(Vec<MatchRecord>, f64)> {
    rulesets.iter().map(|line| scan_one(compiled, line)).collect()
}

#[cfg(feature = "parallel")]
fn scan_all(compiled: &crate::compiler::Compiled, rulesets: &[String]) -> Vec<(Vec<MatchRecord>, f64)> {
    use rayon::prelude::*;
    rulesets.par_iter().map(|line| scan_one(compiled, line)).collect()
}

fn scan_one(compiled: &crate::compiler::Compiled, line: &str) -> (Vec<MatchRecord>, f64) {
    let buf = line.as_bytes();
    let start = Instant::now();
    let (matches, _stats) = scan_with_stats(compiled, buf);
    let time_ms = start.elapsed().as_secs_f64() * 1000.0;
    (matches, time_ms)
}

fn cmd_scan(opts: &ScanArgs, quiet: bool) -> Result<(), DriverError> {
    let patterns = load_patterns(&opts.patterns, opts.max_patterns)?;
    let rulesets = load_rulesets(&opts.rulesets, opts.test_num)?;
    let compiled = compile(&patterns, opts.domain_bits, Strategy::ByLength)?;

    let scanned = scan_all(&compiled, &rulesets);

    let mut results = Vec::with_capacity(rulesets.len());
    let mut mismatches = 0usize;
    for (ruleset_index, (line, (matches, time_ms))) in
        rulesets.iter().zip(scanned.into_iter()).enumerate()
    {
        if opts.compare_naive {
            let expected = naive_scan(&patterns, line.as_bytes());
            if expected != matches {
                mismatches += 1;
                log::warn!(
                    "compare-naive mismatch at ruleset {ruleset_index}: \
                     scanner found {} match(es), naive found {}",
                    matches.len(),
                    expected.len()
                );
            }
        }

        if !quiet && (ruleset_index + 1) % 100 == 0 {
            eprintln!("  scanned {} ruleset(s)...", ruleset_index + 1);
        }

        results.push(RulesetResult {
            ruleset_index,
            matches,
            time_ms,
        });
    }

    if mismatches > 0 {
        return Err(DriverError::CompareMismatch(mismatches));
    }

    let Some(out_dir) = &opts.out else {
        return Err(DriverError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "--out is required",
        )));
    };

    write_outputs(out_dir, &opts.patterns, &opts.rulesets, &results)?;

    if !quiet {
        let total_matches: usize = results.iter().map(|r| r.matches.len()).sum();
        eprintln!(
            "fdrmatch: scan: {} ruleset(s), {total_matches} match(es) written to {}",
            results.len(),
            out_dir.display()
        );
    }

    Ok(())
}

fn write_outputs(
    out_dir: &Path,
    patterns_path: &Path,
    rulesets_path: &Path,
    results: &[RulesetResult],
) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let metadata_path = out_dir.join("metadata.txt");
    let mut mh = File::create(&metadata_path)?;
    writeln!(mh, "Input Files:")?;
    writeln!(mh, "  Patterns: {}", patterns_path.display())?;
    writeln!(mh, "  Rulesets: {}", rulesets_path.display())?;
    writeln!(mh)?;
    writeln!(mh, "Column Descriptions for results.txt:")?;
    writeln!(mh, "  ruleset_index - Zero-based index of the ruleset (line number in rulesets file)")?;
    writeln!(mh, "  matches       - List of (position, pattern_index) pairs where patterns matched")?;
    writeln!(mh, "  time_ms       - Time taken to scan this ruleset in milliseconds")?;
    writeln!(mh)?;
    writeln!(mh, "Match Format: (position, pattern_index)")?;
    writeln!(mh, "  position      - Byte offset in the ruleset where the match starts (0-indexed)")?;
    writeln!(mh, "  pattern_index - Index of the matched pattern from patterns file")?;

    let results_path = out_dir.join("results.txt");
    let mut rh = File::create(&results_path)?;
    writeln!(rh, "ruleset_index\tmatches\ttime_ms")?;
    for r in results {
        write!(rh, "{}\t[", r.ruleset_index)?;
        for (i, m) in r.matches.iter().enumerate() {
            if i > 0 {
                write!(rh, ",")?;
            }
            write!(rh, "({},{})", m.start, m.pattern_id)?;
        }
        writeln!(rh, "]\t{:.6}", r.time_ms)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// bench
// ---------------------------------------------------------------------------

fn cmd_bench(opts: &ScanArgs, json: bool) -> Result<(), DriverError> {
    let patterns = load_patterns(&opts.patterns, opts.max_patterns)?;
    let rulesets = load_rulesets(&opts.rulesets, opts.test_num)?;

    let compile_start = Instant::now();
    let compiled = compile(&patterns, opts.domain_bits, Strategy::ByLength)?;
    let compile_ms = compile_start.elapsed().as_secs_f64() * 1000.0;

    let mut total_stats = crate::scanner::ScanStats::default();
    let mut total_bytes = 0u64;
    let scan_start = Instant::now();
    for line in &rulesets {
        let buf = line.as_bytes();
        let (_, stats) = scan_with_stats(&compiled, buf);
        total_bytes += buf.len() as u64;
        total_stats.ops_and += stats.ops_and;
        total_stats.ops_or += stats.ops_or;
        total_stats.ops_shift += stats.ops_shift;
        total_stats.candidates_raised += stats.candidates_raised;
        total_stats.candidates_verified += stats.candidates_verified;
    }
    let scan_ms = scan_start.elapsed().as_secs_f64() * 1000.0;
    let throughput_mb_s = if scan_ms > 0.0 {
        (total_bytes as f64 / 1_000_000.0) / (scan_ms / 1000.0)
    } else {
        0.0
    };

    if json {
        let payload = serde_json::json!({
            "patterns": patterns.len(),
            "rulesets": rulesets.len(),
            "compile_ms": compile_ms,
            "scan_ms": scan_ms,
            "throughput_mb_s": throughput_mb_s,
            "ops_and": total_stats.ops_and,
            "ops_or": total_stats.ops_or,
            "ops_shift": total_stats.ops_shift,
            "candidates_raised": total_stats.candidates_raised,
            "candidates_verified": total_stats.candidates_verified,
        });
        serde_json::to_writer(io::stderr(), &payload)?;
        eprintln!();
    } else {
        eprintln!("=== Results ===");
        eprintln!("patterns:    {}", patterns.len());
        eprintln!("rulesets:    {}", rulesets.len());
        eprintln!("compile:     {compile_ms:.3} ms");
        eprintln!("scan:        {scan_ms:.3} ms");
        eprintln!("throughput:  {throughput_mb_s:.3} MB/s");
        eprintln!(
            "ops:         and={} or={} shift={}",
            total_stats.ops_and, total_stats.ops_or, total_stats.ops_shift
        );
        eprintln!(
            "candidates:  raised={} verified={}",
            total_stats.candidates_raised, total_stats.candidates_verified
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// compare
// ---------------------------------------------------------------------------

fn parse_results_file(path: &Path) -> io::Result<std::collections::BTreeMap<usize, Vec<(u64, u32)>>> {
    let file = File::open(path)?;
    let mut map = std::collections::BTreeMap::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if i == 0 {
            continue; // header row
        }
        if line.is_empty() {
            continue;
        }
        let mut cols = line.splitn(3, '\t');
        let Some(idx_str) = cols.next() else { continue };
        let Some(matches_str) = cols.next() else { continue };
        let Ok(idx) = idx_str.parse::<usize>() else {
            continue;
        };
        let matches = parse_match_list(matches_str);
        map.insert(idx, matches);
    }
    Ok(map)
}

fn parse_match_list(s: &str) -> Vec<(u64, u32)> {
    let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
    if inner.is_empty() {
        return Vec::new();
    }
    inner
        .split("),(")
        .filter_map(|tuple| {
            let t = tuple.trim_start_matches('(').trim_end_matches(')');
            let mut parts = t.splitn(2, ',');
            let a = parts.next()?.parse().ok()?;
            let b = parts.next()?.parse().ok()?;
            Some((a, b))
        })
        .collect()
}

fn cmd_compare(opts: &CompareArgs) -> Result<(), DriverError> {
    if !opts.a.exists() {
        return Err(DriverError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("missing file {}", opts.a.display()),
        )));
    }
    if !opts.b.exists() {
        return Err(DriverError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("missing file {}", opts.b.display()),
        )));
    }

    let a = parse_results_file(&opts.a)?;
    let b = parse_results_file(&opts.b)?;

    let mut shown = 0usize;
    let mut mismatches = 0usize;

    let all_keys: std::collections::BTreeSet<usize> = a.keys().chain(b.keys()).copied().collect();
    for key in all_keys {
        match (a.get(&key), b.get(&key)) {
            (Some(av), Some(bv)) if av == bv => {}
            (av, bv) => {
                mismatches += 1;
                if shown < opts.show {
                    eprintln!(
                        "ruleset {key}: a={:?} b={:?}",
                        av.unwrap_or(&Vec::new()),
                        bv.unwrap_or(&Vec::new())
                    );
                    shown += 1;
                }
            }
        }
    }

    if mismatches == 0 {
        println!("identical: {} ruleset(s) compared", a.len());
        Ok(())
    } else {
        Err(DriverError::CompareMismatch(mismatches))
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    let exit_code = match &cli.command {
        Cmd::Scan(args) => match cmd_scan(args, cli.quiet) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("fdrmatch: scan: {e}");
                match e {
                    DriverError::CompareMismatch(_) => 2,
                    _ => 1,
                }
            }
        },
        Cmd::Bench(args) => match cmd_bench(args, cli.json_output) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("fdrmatch: bench: {e}");
                1
            }
        },
        Cmd::Compare(args) => match cmd_compare(args) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("fdrmatch: compare: {e}");
                match e {
                    DriverError::CompareMismatch(_) => 2,
                    _ => 3,
                }
            }
        },
    };

    process::exit(exit_code);
}
