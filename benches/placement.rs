//! Symbol placement micro-benchmarks
//!
//! Measures how long one card's layout takes as symbol counts grow.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use spotdeck::{RandomizationConfig, RingLayout, compute_placements, compute_slots};
use std::hint::black_box;

fn benchmark_single_ring(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_single_ring");
    let config = RandomizationConfig::default();

    for slot_count in [3, 6, 8, 12] {
        group.bench_with_input(
            BenchmarkId::new("symbols", slot_count),
            &slot_count,
            |b, &slot_count| {
                let mut rng = StdRng::seed_from_u64(7);
                b.iter(|| {
                    compute_placements(black_box(slot_count), 45.0, &mut rng, &config)
                        .expect("Failed to place symbols")
                });
            },
        );
    }

    group.finish();
}

fn benchmark_crowded_double_ring(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement_double_ring");
    let config = RandomizationConfig {
        ring_layout: RingLayout::Double {
            inner_ratio: 0.55,
            outer_ratio: 0.9,
            inner_share: 0.45,
        },
        symbol_box_fraction: 0.3,
        ..Default::default()
    };

    // Large boxes on a small card push most symbols through the retry ladder.
    for slot_count in [8, 12, 14] {
        group.bench_with_input(
            BenchmarkId::new("symbols", slot_count),
            &slot_count,
            |b, &slot_count| {
                let mut rng = StdRng::seed_from_u64(7);
                b.iter(|| {
                    compute_placements(black_box(slot_count), 30.0, &mut rng, &config)
                        .expect("Failed to place symbols")
                });
            },
        );
    }

    group.finish();
}

fn benchmark_page_grid(c: &mut Criterion) {
    c.bench_function("page_grid_all_counts", |b| {
        b.iter(|| {
            for per_page in 1..=6 {
                compute_slots(210.0, 297.0, 10.0, black_box(90.0), per_page)
                    .expect("Failed to compute grid");
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_ring,
    benchmark_crowded_double_ring,
    benchmark_page_grid
);
criterion_main!(benches);
