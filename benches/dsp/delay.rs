//! Benchmarks for the delay line and the effects built on it.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use facade_mix::dsp::delay::DelayLine;
use facade_mix::graph::{
    chorus::ChorusNode,
    delay::FeedbackDelayNode,
    node::{GraphNode, RenderCtx},
};
use facade_mix::sequencing::Duration;

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");
    let ctx = RenderCtx::at_rate(48_000.0);

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        // Interpolated read with a swept delay time (the chorus read head)
        let mut delay = DelayLine::new();
        for &sample in &input {
            delay.write(sample);
        }
        group.bench_with_input(BenchmarkId::new("read_interpolated", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for i in 0..size {
                    let delay_time = 67.0 + (i as f32 * 0.1).sin() * 23.0;
                    sum += delay.read_interpolated(black_box(delay_time));
                }
                sum
            })
        });

        let mut chorus = ChorusNode::new(1.8, 1.4, 0.35);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("chorus", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                chorus.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });

        let eighth = Duration::EIGHTH.to_seconds(facade_mix::BPM) as f32;
        let mut echo = FeedbackDelayNode::new(eighth, 0.28);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("feedback_eighth", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                echo.render_block(black_box(&mut buffer), black_box(&ctx));
            })
        });
    }

    group.finish();
}
