//! Performance benchmarks for ferro-liftover
//!
//! Run with: cargo bench
//! Run specific benchmark: cargo bench -- parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ferro_liftover::{lift, ChainFile, GenomeBuild};

/// Render a synthetic chain file: `chains` non-overlapping chains on chr1,
/// each with `blocks` 90-base blocks separated by 10-base gaps.
fn synthetic_chain_text(chains: usize, blocks: usize) -> String {
    let span = (blocks as i64 - 1) * 100 + 90;
    let mut text = String::new();
    for id in 0..chains {
        let ref_start = id as i64 * 100_000;
        let query_start = ref_start + 50_000;
        text.push_str(&format!(
            "chain 1000 chr1 249250621 + {} {} chr1 248956422 + {} {} {}\n",
            ref_start,
            ref_start + span,
            query_start,
            query_start + span,
            id + 1,
        ));
        for _ in 0..blocks - 1 {
            text.push_str("90\t10\t10\n");
        }
        text.push_str("90\n\n");
    }
    text
}

// =============================================================================
// Parsing benchmarks
// =============================================================================

/// Benchmark chain-file parsing and index construction
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for chains in [100usize, 1000] {
        let text = synthetic_chain_text(chains, 10);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("chains", chains), &text, |b, text| {
            b.iter(|| ChainFile::parse(black_box(text.as_bytes())).unwrap())
        });
    }

    group.finish();
}

// =============================================================================
// Lift benchmarks
// =============================================================================

/// Benchmark single-position lifts: block hits, gap misses, absent
/// chromosomes
fn bench_lift(c: &mut Criterion) {
    let text = synthetic_chain_text(1000, 10);
    let chain_file = ChainFile::parse(text.as_bytes()).unwrap();

    // Middle chain (id 501): block hit at offset 50, gap miss at offset 95.
    let lookups = [
        ("block_hit", "chr1", 50_000_050i64),
        ("gap_miss", "chr1", 50_000_095),
        ("position_miss", "chr1", 99_999_999),
        ("chromosome_miss", "chr9", 100),
    ];

    let mut group = c.benchmark_group("lift");

    for (name, chromosome, position) in lookups {
        group.bench_with_input(
            BenchmarkId::new("single", name),
            &(chromosome, position),
            |b, &(chromosome, position)| {
                b.iter(|| {
                    let _ = lift(
                        black_box(&chain_file),
                        GenomeBuild::GRCh37,
                        chromosome,
                        position,
                    );
                })
            },
        );
    }

    group.finish();
}

/// Benchmark lift throughput over a sweep of positions
fn bench_lift_throughput(c: &mut Criterion) {
    let text = synthetic_chain_text(1000, 10);
    let chain_file = ChainFile::parse(text.as_bytes()).unwrap();

    let positions: Vec<i64> = (0..1000).map(|i| i * 100_000 + 450).collect();

    let mut group = c.benchmark_group("lift_throughput");
    group.throughput(Throughput::Elements(positions.len() as u64));
    group.bench_function("sweep_1000", |b| {
        b.iter(|| {
            for position in &positions {
                let _ = lift(
                    black_box(&chain_file),
                    GenomeBuild::GRCh37,
                    "chr1",
                    *position,
                );
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_lift, bench_lift_throughput);

criterion_main!(benches);
