//! Benchmarks for the state-variable filter and the cascaded filter node.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use facade_mix::dsp::filter::{FilterType, SVFilter};
use facade_mix::graph::{
    filter::FilterNode,
    node::{GraphNode, RenderCtx},
};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = RenderCtx::at_rate(48_000.0);

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for (name, filter_type) in [
            ("lowpass", FilterType::LowPass),
            ("highpass", FilterType::HighPass),
            ("bandpass", FilterType::BandPass),
            ("notch", FilterType::Notch),
        ] {
            let mut filter = SVFilter::new(filter_type, 1000.0);
            filter.set_resonance(0.5);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }

        // Bass voice filter: two cascaded stages for -24 dB/octave
        let mut filter = FilterNode::lowpass_24db(200.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass_24db", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
