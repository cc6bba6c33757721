use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fdrmatch::compiler::{compile, Strategy};
use fdrmatch::naive::naive_scan;
use fdrmatch::scanner::scan;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

fn gen_text(size: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    // restrict to lowercase ASCII so patterns can plausibly occur
    (0..size).map(|_| rng.random_range(b'a'..=b'z')).collect()
}

const WORDS: [&str; 8] = [
    "get", "post", "head", "put", "delete", "options", "patch", "trace",
];

fn gen_patterns(n: usize) -> Vec<(u32, Vec<u8>)> {
    (0..n)
        .map(|i| (i as u32, WORDS[i % WORDS.len()].as_bytes().to_vec()))
        .collect()
}

fn bench_scan_vs_naive(c: &mut Criterion) {
    let mut g = c.benchmark_group("scan_vs_naive_throughput");
    let patterns = gen_patterns(8);
    let compiled = compile(&patterns, 9, Strategy::ByLength).unwrap();

    for size in [4 * 1024usize, 64 * 1024, 1024 * 1024] {
        let buf = gen_text(size, 7);
        g.throughput(Throughput::Bytes(size as u64));

        g.bench_with_input(BenchmarkId::new("fdr_scan", size), &size, |b, _| {
            b.iter(|| {
                let matches = scan(black_box(&compiled), black_box(&buf));
                black_box(matches);
            });
        });

        g.bench_with_input(BenchmarkId::new("naive_scan", size), &size, |b, _| {
            b.iter(|| {
                let matches = naive_scan(black_box(&patterns), black_box(&buf));
                black_box(matches);
            });
        });
    }
    g.finish();
}

fn bench_compile_cost(c: &mut Criterion) {
    let mut g = c.benchmark_group("compile_cost_vs_pattern_count");
    for n in [1usize, 8, 64] {
        let patterns = gen_patterns(n);
        g.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let compiled = compile(black_box(&patterns), 9, Strategy::ByLength).unwrap();
                black_box(compiled);
            });
        });
    }
    g.finish();
}

fn bench_domain_bits(c: &mut Criterion) {
    let mut g = c.benchmark_group("scan_throughput_vs_domain_bits");
    let patterns = gen_patterns(8);
    let buf = gen_text(256 * 1024, 11);

    for d in [8u8, 9, 12, 16] {
        let compiled = compile(&patterns, d, Strategy::ByLength).unwrap();
        g.throughput(Throughput::Bytes(buf.len() as u64));
        g.bench_with_input(BenchmarkId::from_parameter(d), &d, |b, _| {
            b.iter(|| {
                let matches = scan(black_box(&compiled), black_box(&buf));
                black_box(matches);
            });
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    bench_scan_vs_naive,
    bench_compile_cost,
    bench_domain_bits
);
criterion_main!(benches);
