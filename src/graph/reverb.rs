use crate::dsp::{buffer::blend_dry_wet, reverb::SchroederReverb};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Reverb Node
===========

The shared room every instrument sits in. It is the first stage after the
mix bus, so all enabled parts are reverberated together:

  mix bus ──→ [reverb] ──→ compressor ──→ master

  decay   seconds for the tail to fall 60 dB (master chain: 7 s)
  wet     dry/wet blend (master chain: 0.35)

The underlying delay lines are sized from the sample rate, so the network is
built lazily on the first render and rebuilt if the rate ever changes.
*/

pub struct ReverbNode {
    reverb: Option<SchroederReverb>,
    sample_rate: f32,
    decay: f32,
    wet: f32,
}

impl ReverbNode {
    pub fn new(decay: f32, wet: f32) -> Self {
        Self {
            reverb: None,
            sample_rate: 0.0,
            decay: decay.max(0.01),
            wet: wet.clamp(0.0, 1.0),
        }
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    pub fn wet(&self) -> f32 {
        self.wet
    }
}

impl GraphNode for ReverbNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if self.sample_rate != ctx.sample_rate {
            self.sample_rate = ctx.sample_rate;
            self.reverb = Some(SchroederReverb::new(ctx.sample_rate, self.decay));
        }

        if let Some(reverb) = self.reverb.as_mut() {
            for sample in out.iter_mut() {
                let wet = reverb.process(*sample);
                *sample = blend_dry_wet(*sample, wet, self.wet);
            }
        }
    }
}
