//! Benchmarks for the full mixer.
//!
//! Renders through `GraphManager::render`: transport, event dispatch, every
//! instrument chain, the master chain and the wind bed.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use facade_mix::catalog::InstrumentKey;
use facade_mix::config::MixConfig;
use facade_mix::mixer::{GraphManager, ImmediateGate};
use facade_mix::selection::InstrumentSelection;

use crate::BLOCK_SIZES;

fn selections(count: usize) -> Vec<InstrumentSelection> {
    InstrumentKey::ALL
        .iter()
        .enumerate()
        .map(|(i, &instrument)| InstrumentSelection {
            instrument,
            sequence_index: 0,
            enabled: i < count,
        })
        .collect()
}

fn manager() -> GraphManager<ImmediateGate> {
    GraphManager::new(MixConfig::default().with_seed(1), ImmediateGate::new()).expect("default config is valid")
}

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mix");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for count in [0, 1, 4] {
            let mut manager = manager();
            manager.rebuild(&selections(count));

            group.bench_with_input(BenchmarkId::new(format!("{count}_parts"), size), &size, |b, _| {
                b.iter(|| {
                    manager.render(black_box(&mut buffer));
                })
            });
        }
    }

    // Rebuild cost: what a panel click pays
    let mut manager = manager();
    let all = selections(InstrumentKey::ALL.len());
    group.bench_function("rebuild_all", |b| {
        b.iter(|| {
            manager.rebuild(black_box(&all));
        })
    });

    group.finish();
}
