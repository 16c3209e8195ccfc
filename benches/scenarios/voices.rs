//! Benchmarks for single instrument voices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use facade_mix::graph::node::{GraphNode, RenderCtx};
use facade_mix::sequencing::{note, PitchClass};
use facade_mix::synth::poly::PolySynth;
use facade_mix::voices;

use crate::BLOCK_SIZES;

fn bench_voice<N: GraphNode>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    name: &str,
    size: usize,
    mut voice: N,
    ctx: &RenderCtx,
) {
    let mut buffer = vec![0.0f32; size];
    voice.note_on(ctx);
    group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
        b.iter(|| {
            voice.render_block(black_box(&mut buffer), black_box(ctx));
        })
    });
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let e2 = RenderCtx::from_note(48_000.0, note(PitchClass::E, 2), 0.8);
    let e3 = RenderCtx::from_note(48_000.0, note(PitchClass::E, 3), 0.65);
    let c1 = RenderCtx::from_note(48_000.0, note(PitchClass::C, 1), 0.85);

    for &size in BLOCK_SIZES {
        bench_voice(&mut group, "guitar", size, voices::guitar(), &e3);
        bench_voice(&mut group, "pad", size, voices::pad(), &e3);
        // square → modulated 24 dB low-pass → amp envelope
        bench_voice(&mut group, "bass", size, voices::bass(), &e2);
        bench_voice(&mut group, "kick", size, voices::kick(), &c1);
        bench_voice(&mut group, "snare", size, voices::snare(7), &c1);
        // six PM partials plus a swept high-pass: the most expensive voice
        bench_voice(&mut group, "hat", size, voices::hat(), &c1);
        bench_voice(&mut group, "wind", size, voices::wind(7), &c1);

        // Guitar chord: four voices at once
        let mut synth = PolySynth::new(&voices::guitar, 8, 48_000.0);
        let mut buffer = vec![0.0f32; size];
        group.bench_with_input(BenchmarkId::new("guitar_chord", size), &size, |b, _| {
            b.iter(|| {
                if synth.active_voice_count() == 0 {
                    synth.trigger_attack_release(&[48, 52, 55, 59], 10.0, 0.65);
                }
                synth.render_block(black_box(&mut buffer), black_box(&e3));
            })
        });
    }

    group.finish();
}
