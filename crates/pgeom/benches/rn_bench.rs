//! Criterion benchmarks for the flat-buffer linear algebra (group "rn").
//! Focus orders: n in {3, 4, 5, 6} (closed forms vs. Laplace expansion).
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use pgeom::rn;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_matrix(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut m: Vec<f64> = (0..n * n).map(|_| rng.gen_range(-1.0..1.0)).collect();
    // diagonal dominance keeps inverses well defined
    for i in 0..n {
        m[i * n + i] += n as f64;
    }
    m
}

fn bench_rn(c: &mut Criterion) {
    let mut group = c.benchmark_group("rn");
    for &n in &[3usize, 4, 5, 6] {
        group.bench_with_input(BenchmarkId::new("determinant", n), &n, |b, &n| {
            let m = random_matrix(n, 7);
            b.iter(|| rn::determinant(&m))
        });
        group.bench_with_input(BenchmarkId::new("try_inverse", n), &n, |b, &n| {
            let m = random_matrix(n, 8);
            b.iter(|| rn::try_inverse(&m))
        });
        group.bench_with_input(BenchmarkId::new("times_into", n), &n, |b, &n| {
            let (x, y) = (random_matrix(n, 9), random_matrix(n, 10));
            let mut dst = vec![0.0; n * n];
            b.iter(|| rn::times_into(&mut dst, &x, &y))
        });
        group.bench_with_input(BenchmarkId::new("complete_basis", n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let m = random_matrix(n, 11);
                    m.chunks(n).take(n - 1).map(|r| r.to_vec()).collect::<Vec<_>>()
                },
                |rows| rn::complete_basis(&rows),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rn);
criterion_main!(benches);
