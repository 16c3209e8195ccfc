//! Kick drum voice.
//!
//! A "membrane": a sine whose pitch starts `octaves` times above the note and
//! falls exponentially onto it within `pitch_decay` seconds. The drop is what
//! the ear hears as the beater hitting the skin; the long amplitude decay
//! afterwards is the drum body.
//!
//! ```text
//! freq(t) = note · octaves^(1 - t / pitch_decay)     t < pitch_decay
//!         = note                                     afterwards
//! ```
//!
//! The mixer plays it on C1 (~32.7 Hz), so the sweep runs ~163 Hz → 33 Hz
//! in 10 ms.

use crate::dsp::oscillator::{OscillatorBlock, Waveform};
use crate::graph::{
    envelope::EnvNode,
    extensions::NodeExt,
    node::{GraphNode, RenderCtx},
};

pub struct MembraneNode {
    osc: OscillatorBlock,
    pitch_decay: f32,
    octaves: f32,
    elapsed: u32,
}

impl MembraneNode {
    pub fn new(pitch_decay: f32, octaves: f32) -> Self {
        Self {
            osc: OscillatorBlock::new(Waveform::Sine),
            pitch_decay: pitch_decay.max(1e-4),
            octaves: octaves.max(1.0),
            elapsed: 0,
        }
    }

    fn frequency_at(&self, note_hz: f32, sample_rate: f32) -> f32 {
        let t = self.elapsed as f32 / sample_rate;
        if t >= self.pitch_decay {
            return note_hz;
        }
        note_hz * self.octaves.powf(1.0 - t / self.pitch_decay)
    }
}

impl GraphNode for MembraneNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for sample in out.iter_mut() {
            let freq = self.frequency_at(ctx.frequency, ctx.sample_rate);
            *sample = self.osc.next_sample(freq, ctx.sample_rate);
            self.elapsed = self.elapsed.saturating_add(1);
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.elapsed = 0;
        self.osc.reset();
    }
}

pub fn kick() -> impl GraphNode {
    MembraneNode::new(0.01, 5.0).amplify(EnvNode::percussive(0.001, 0.5, 0.25))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_falls_onto_the_note() {
        let mut node = MembraneNode::new(0.01, 5.0);
        node.note_on(&RenderCtx::at_rate(48_000.0));
        assert!((node.frequency_at(32.7, 48_000.0) - 163.5).abs() < 0.1);

        node.elapsed = 480;
        assert_eq!(node.frequency_at(32.7, 48_000.0), 32.7);

        node.elapsed = 240;
        let mid = node.frequency_at(32.7, 48_000.0);
        assert!(mid > 32.7 && mid < 163.5);
    }

    #[test]
    fn kick_hits_and_fades() {
        let ctx = RenderCtx::from_note(48_000.0, 24, 1.0);
        let mut voice = kick();
        voice.note_on(&ctx);

        let mut block = vec![0.0; 1024];
        voice.render_block(&mut block, &ctx);
        assert!(block.iter().any(|s| s.abs() > 0.5));
    }
}
