//! Timing for tree construction and the accelerate query at a few body
//! counts (SPEC_FULL.md §2.4), grounded in `emilyst-stardrift`'s
//! `benches/octree_benchmarks.rs`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use grav_hut::{Octree, OctreeConfig, Prng, Vec3};

fn random_bodies(n: usize, seed: u64) -> Vec<(Vec3, f64)> {
    let mut rng = Prng::seeded(seed);
    (0..n).map(|_| (rng.vector(5e4), rng.double_range(1e3, 1e8))).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_build");
    for &n in &[100usize, 1_000, 10_000] {
        let bodies = random_bodies(n, 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &bodies, |b, bodies| {
            b.iter(|| {
                let tree = Octree::build(
                    bodies.iter().copied(),
                    Vec3::new_zero(),
                    2e5,
                    OctreeConfig::default(),
                    67.,
                );
                black_box(tree.mass())
            });
        });
    }
    group.finish();
}

fn bench_accelerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_accelerate");
    for &n in &[100usize, 1_000, 10_000] {
        let bodies = random_bodies(n, 2);
        let tree = Octree::build(
            bodies.iter().copied(),
            Vec3::new_zero(),
            2e5,
            OctreeConfig::default(),
            67.,
        );
        group.bench_with_input(BenchmarkId::from_parameter(n), &bodies, |b, bodies| {
            b.iter(|| {
                let mut total = Vec3::new_zero();
                for (pos, _) in bodies {
                    total += tree.accelerate(*pos);
                }
                black_box(total)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_accelerate);
criterion_main!(benches);
