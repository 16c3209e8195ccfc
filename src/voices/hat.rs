//! Metallic hi-hat voice.
//!
//! Six square-wave partials at inharmonic ratios of a 180 Hz base, each
//! phase-modulated by another square `harmonicity` times higher. The sum is
//! a dense, clangy spectrum with no clear pitch. It is high-passed around
//! `resonance` Hz, and the cutoff starts `octaves` above that and falls with
//! the envelope so the hit opens bright and closes darker.
//!
//! ```text
//! 6 × (square ⊕ PM square) ──→ Σ ──→ HP(resonance · 2^(octaves · env)) ──→ × env
//! ```
//!
//! The mixer adds an 8 kHz high-pass after this voice on the drum chain.

use std::f32::consts::TAU;

use crate::dsp::envelope::Envelope;
use crate::dsp::filter::SVFilter;
use crate::graph::node::{GraphNode, RenderCtx};

pub const HAT_VOLUME_DB: f32 = -8.0;
pub const HAT_FILTER_HZ: f32 = 8_000.0;

const PARTIAL_RATIOS: [f32; 6] = [1.0, 1.483, 1.932, 2.546, 2.63, 3.897];

struct Partial {
    carrier: f32,
    modulator: f32,
}

#[inline]
fn square(phase: f32) -> f32 {
    if phase.rem_euclid(1.0) < 0.5 {
        1.0
    } else {
        -1.0
    }
}

pub struct MetalNode {
    frequency: f32,
    harmonicity: f32,
    modulation_index: f32,
    resonance: f32,
    octaves: f32,
    partials: [Partial; 6],
    filter: SVFilter,
    env: Envelope,
}

impl MetalNode {
    pub fn new(frequency: f32, harmonicity: f32, modulation_index: f32, resonance: f32, octaves: f32) -> Self {
        Self {
            frequency,
            harmonicity,
            modulation_index,
            resonance,
            octaves,
            partials: std::array::from_fn(|_| Partial {
                carrier: 0.0,
                modulator: 0.0,
            }),
            filter: SVFilter::highpass(resonance),
            env: Envelope::percussive(0.001, 0.12, 0.1),
        }
    }
}

impl GraphNode for MetalNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let sr = ctx.sample_rate;
        // index is in radians; partial phases run in cycles
        let depth = self.modulation_index / TAU;

        for sample in out.iter_mut() {
            let level = self.env.next_sample(ctx);
            let mut sum = 0.0;
            for (partial, ratio) in self.partials.iter_mut().zip(PARTIAL_RATIOS) {
                let carrier_hz = self.frequency * ratio;
                let modulation = square(partial.modulator) * depth;
                sum += square(partial.carrier + modulation);

                partial.carrier = (partial.carrier + carrier_hz / sr).fract();
                partial.modulator = (partial.modulator + carrier_hz * self.harmonicity / sr).fract();
            }

            let cutoff = self.resonance * 2f32.powf(self.octaves * level);
            self.filter.set_cutoff(cutoff);
            let mut body = [sum / PARTIAL_RATIOS.len() as f32];
            self.filter.render(&mut body, ctx);
            *sample = body[0] * level;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.env.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.env.note_off(ctx);
    }

    fn get_envelope_level(&self) -> Option<f32> {
        Some(self.env.level())
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}

pub fn hat() -> impl GraphNode {
    MetalNode::new(180.0, 5.1, 32.0, 4_000.0, 1.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_until_struck() {
        let ctx = RenderCtx::at_rate(48_000.0);
        let mut node = hat();
        let mut block = vec![0.0; 256];
        node.render_block(&mut block, &ctx);
        assert!(block.iter().all(|s| *s == 0.0));

        node.note_on(&ctx);
        node.render_block(&mut block, &ctx);
        assert!(block.iter().any(|s| s.abs() > 0.01));
        assert!(block.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn envelope_drives_activity() {
        let ctx = RenderCtx::at_rate(48_000.0);
        let mut node = hat();
        node.note_on(&ctx);
        node.note_off(&ctx);

        let mut block = vec![0.0; 48_000 / 5];
        node.render_block(&mut block, &ctx);
        assert!(!node.is_active());
    }
}
