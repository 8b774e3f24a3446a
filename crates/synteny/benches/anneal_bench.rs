//! Criterion benchmarks for grouping and annealing.
//! Focus sizes: elements per sequence in {10, 50, 200}, two or four sequences.
//! Results live under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use synteny::api::{Annealer, GenomicElement, Layout, LayoutParams};

/// `n` genes per sequence, each homologous to its rank on every other track,
/// with randomly stretched intergenic gaps.
fn random_tracks(sequences: usize, n: usize, seed: u64) -> Vec<GenomicElement> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(sequences * n);
    for s in 0..sequences {
        let mut cursor = 0.0;
        for i in 0..n {
            let width = rng.gen_range(500.0..3_000.0);
            let h = format!("h{i}");
            out.push(GenomicElement::new(
                format!("s{s}g{i}"),
                format!("s{s}"),
                cursor,
                cursor + width,
                Some(&h),
            ));
            cursor += width + rng.gen_range(100.0..20_000.0);
        }
    }
    out
}

fn bench_params() -> LayoutParams {
    let mut params = LayoutParams::default();
    params.anneal.time_budget_ms = None;
    params.anneal.max_iterations = 5_000;
    params
}

fn bench_anneal(c: &mut Criterion) {
    let mut group = c.benchmark_group("anneal");
    for &sequences in &[2usize, 4] {
        for &n in &[10usize, 50, 200] {
            let elements = random_tracks(sequences, n, 42);
            let id = format!("{sequences}x{n}");
            group.bench_with_input(BenchmarkId::new("build", &id), &elements, |b, els| {
                b.iter(|| Layout::build(els, None).unwrap())
            });
            group.bench_with_input(BenchmarkId::new("run_5k_ticks", &id), &elements, |b, els| {
                b.iter_batched(
                    || Layout::build(els, None).unwrap(),
                    |layout| {
                        let _out = Annealer::new(layout, bench_params()).unwrap().run();
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_anneal);
criterion_main!(benches);
