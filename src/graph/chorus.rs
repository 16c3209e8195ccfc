use std::f32::consts::TAU;

use crate::dsp::{buffer::blend_dry_wet, delay::DelayLine};
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/*
Chorus
======

The guitar part runs through this: a short delay whose length is swept by a
sine LFO, blended with the dry signal. The moving read head slightly detunes
the copy, which thickens the pluck into something closer to a strummed pair.

  delay(t) = delay_ms * (1 + depth * sin(2π · rate · t))

  rate      LFO speed in Hz (guitar: 1.8)
  delay_ms  centre delay (guitar: 1.4 ms)
  depth     0..1, fraction of the centre delay the LFO swings (guitar: 0.35)
  mix       dry/wet blend

Reads are interpolated; a modulated integer read would zipper.
*/

#[derive(Clone, Copy, Debug)]
pub enum ChorusParam {
    Rate,
    Depth,
    Mix,
}

pub struct ChorusNode {
    delay_line: DelayLine,
    lfo_phase: f32,
    rate: f32,
    delay_ms: f32,
    depth: f32,
    mix: f32,
}

impl ChorusNode {
    pub fn new(rate: f32, delay_ms: f32, depth: f32) -> Self {
        Self {
            delay_line: DelayLine::new(),
            lfo_phase: 0.0,
            rate: rate.clamp(0.01, 20.0),
            delay_ms: delay_ms.clamp(0.1, 50.0),
            depth: depth.clamp(0.0, 1.0),
            mix: 0.5,
        }
    }

    pub fn with_mix(mut self, mix: f32) -> Self {
        self.mix = mix.clamp(0.0, 1.0);
        self
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }
}

impl GraphNode for ChorusNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let phase_inc = TAU * self.rate / ctx.sample_rate;
        let centre = self.delay_ms * ctx.sample_rate / 1000.0;

        for sample in out.iter_mut() {
            let sweep = 1.0 + self.depth * self.lfo_phase.sin();
            let wet = self.delay_line.read_interpolated((centre * sweep).max(1.0));
            self.delay_line.write(*sample);
            *sample = blend_dry_wet(*sample, wet, self.mix);

            self.lfo_phase += phase_inc;
            if self.lfo_phase >= TAU {
                self.lfo_phase -= TAU;
            }
        }
    }
}

impl Modulatable for ChorusNode {
    type Param = ChorusParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            ChorusParam::Rate => self.rate,
            ChorusParam::Depth => self.depth,
            ChorusParam::Mix => self.mix,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        let value = base + modulation;
        match param {
            ChorusParam::Rate => self.rate = value.clamp(0.01, 20.0),
            ChorusParam::Depth => self.depth = value.clamp(0.0, 1.0),
            ChorusParam::Mix => self.mix = value.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ctx() -> RenderCtx {
        RenderCtx::at_rate(48_000.0)
    }

    #[test]
    fn dry_mix_is_transparent() {
        let mut node = ChorusNode::new(1.8, 1.4, 0.35).with_mix(0.0);
        let mut block: Vec<f32> = (0..256).map(|i| (i as f32 * 0.05).sin()).collect();
        let original = block.clone();

        node.render_block(&mut block, &test_ctx());
        assert_eq!(block, original);
    }

    #[test]
    fn wet_copy_lags_the_input() {
        let mut node = ChorusNode::new(1.8, 1.4, 0.35).with_mix(1.0);
        let mut block = vec![0.0; 256];
        block[0] = 1.0;

        node.render_block(&mut block, &test_ctx());
        assert_eq!(block[0], 0.0);
        // 1.4 ms at 48 kHz is ~67 samples, swept by at most 35%
        let arrival = block.iter().position(|s| s.abs() > 0.1).unwrap();
        assert!((40..100).contains(&arrival), "arrived at {arrival}");
    }
}
