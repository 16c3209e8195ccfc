//! Benchmarks for the bus compressor.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use facade_mix::dsp::compressor::Compressor;

use crate::BLOCK_SIZES;

pub fn bench_compressor(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/compressor");

    for &size in BLOCK_SIZES {
        // Loud enough to sit above the -18 dB threshold most of the time
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.03).sin() * 0.8).collect();

        let mut comp = Compressor::new(48_000.0, -18.0, 3.0, 0.01, 0.25);
        group.bench_with_input(BenchmarkId::new("master", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &sample in &input {
                    sum += comp.process(black_box(sample));
                }
                sum
            })
        });
    }

    group.finish();
}
