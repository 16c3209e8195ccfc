//! Benchmarks for oscillator and noise generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use facade_mix::dsp::oscillator::{NoiseBlock, NoiseColor, OscillatorBlock, Waveform};
use facade_mix::graph::node::RenderCtx;

use crate::BLOCK_SIZES;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, waveform) in [
            ("sine", Waveform::Sine),
            ("sawtooth", Waveform::Saw),
            ("square", Waveform::Square),
            ("triangle", Waveform::Triangle),
        ] {
            let mut osc = OscillatorBlock::new(waveform);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    osc.render(black_box(&mut buffer), black_box(&ctx));
                })
            });
        }

        // Pink runs the Kellet filter bank per sample, brown a leaky integrator
        for (name, color) in [
            ("white", NoiseColor::White),
            ("pink", NoiseColor::Pink),
            ("brown", NoiseColor::Brown),
        ] {
            let mut noise = NoiseBlock::new(color, 7);
            group.bench_with_input(BenchmarkId::new(format!("noise_{name}"), size), &size, |b, _| {
                b.iter(|| {
                    noise.render(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
