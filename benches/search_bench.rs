//! Allocation throughput benchmarks: full three-tier allocation over
//! synthetic ranking pools of increasing depth.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use anchorleg::data::events::IndividualEvent;
use anchorleg::data::rankings::{RankingEntry, RankingSet};
use anchorleg::optimizer::{allocate_tiers, OptimizationConfig};

fn group_entries(prefix: &str, depth: usize, base: f64, step: f64) -> Vec<RankingEntry> {
    (1..=depth)
        .map(|rank| RankingEntry::new(format!("{prefix}{rank}"), base + rank as f64 * step))
        .collect()
}

fn synthetic_rankings(depth: usize) -> RankingSet {
    let mut rankings = RankingSet::new();
    rankings.insert(IndividualEvent::Free50, group_entries("F", depth, 21.5, 0.3));
    rankings.insert(IndividualEvent::Free100, group_entries("G", depth, 47.0, 0.5));
    rankings.insert(IndividualEvent::Free200, group_entries("H", depth, 104.0, 1.0));
    rankings.insert(IndividualEvent::Back50, group_entries("B", depth, 26.0, 0.4));
    rankings.insert(IndividualEvent::Breast50, group_entries("C", depth, 30.0, 0.4));
    rankings.insert(IndividualEvent::Fly50, group_entries("D", depth, 25.0, 0.4));
    rankings.insert(IndividualEvent::Back100, group_entries("B", depth, 57.0, 0.6));
    rankings.insert(IndividualEvent::Breast100, group_entries("C", depth, 63.0, 0.6));
    rankings.insert(IndividualEvent::Fly100, group_entries("D", depth, 54.0, 0.6));
    rankings
}

fn bench_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocation");
    group.sample_size(50);

    for depth in [8usize, 12, 16] {
        let rankings = synthetic_rankings(depth);
        group.bench_with_input(
            format!("three_tiers_depth_{depth}"),
            &rankings,
            |b, rankings| {
                b.iter(|| {
                    let config = OptimizationConfig::default();
                    black_box(allocate_tiers(black_box(rankings), &config))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_allocation);
criterion_main!(benches);
