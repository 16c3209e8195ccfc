use std::f32::consts::TAU;

use rand::{rngs::SmallRng, Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Triangle,
}

/// Phase-accumulating oscillator. Frequency comes from the render context so
/// the same block serves note-tracking voices and fixed-pitch drums.
#[derive(Debug, Clone)]
pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
        }
    }

    /// One sample at `frequency`. Phase is kept in [0, 1).
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let p = self.phase;
        let value = match self.waveform {
            Waveform::Sine => (TAU * p).sin(),
            Waveform::Saw => 2.0 * p - 1.0,
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
        };

        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();
        value
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(ctx.frequency, ctx.sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseColor {
    White,
    /// -3 dB/octave, snare body.
    Pink,
    /// -6 dB/octave, the ambient wind bed.
    Brown,
}

/// Noise source with its own seeded generator so renders are reproducible.
#[derive(Debug, Clone)]
pub struct NoiseBlock {
    color: NoiseColor,
    rng: SmallRng,
    // Paul Kellet's economy pink filter
    pink: [f32; 3],
    brown: f32,
}

impl NoiseBlock {
    pub fn new(color: NoiseColor, seed: u64) -> Self {
        Self {
            color,
            rng: SmallRng::seed_from_u64(seed),
            pink: [0.0; 3],
            brown: 0.0,
        }
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let white: f32 = self.rng.gen_range(-1.0..1.0);
        match self.color {
            NoiseColor::White => white,
            NoiseColor::Pink => {
                self.pink[0] = 0.99765 * self.pink[0] + white * 0.0990460;
                self.pink[1] = 0.96300 * self.pink[1] + white * 0.2965164;
                self.pink[2] = 0.57000 * self.pink[2] + white * 1.0526913;
                (self.pink[0] + self.pink[1] + self.pink[2] + white * 0.1848) * 0.25
            }
            NoiseColor::Brown => {
                self.brown = (self.brown + white * 0.02) / 1.02;
                self.brown * 3.5
            }
        }
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn color(&self) -> NoiseColor {
        self.color
    }
}
