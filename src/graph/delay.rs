use crate::dsp::{buffer::blend_dry_wet, delay::DelayLine};
use crate::graph::node::{GraphNode, RenderCtx};

/*
Feedback Delay
==============

  in ──┬───────────────────────────→ (dry)──┐
       └──→ (+) ──→ [delay line] ──┬──→ (wet)──┴──→ out
             ↑                     │
             └──── × feedback ─────┘

Each repeat comes back `feedback` times quieter. The synth pad uses an
eighth-note delay at the transport tempo with 0.28 feedback, fully wet, so
the pad is heard as a trail of echoes locked to the loop.

The delay time is given in seconds and converted with the render context's
sample rate, so the node does not need to know the sample rate up front.
*/

pub struct FeedbackDelayNode {
    delay_line: DelayLine,
    delay_seconds: f32,
    feedback: f32,
    mix: f32,
}

impl FeedbackDelayNode {
    pub fn new(delay_seconds: f32, feedback: f32) -> Self {
        Self {
            delay_line: DelayLine::new(),
            delay_seconds: delay_seconds.max(0.0),
            feedback: feedback.clamp(0.0, 0.95),
            mix: 1.0,
        }
    }

    pub fn with_mix(mut self, mix: f32) -> Self {
        self.mix = mix.clamp(0.0, 1.0);
        self
    }

    pub fn delay_seconds(&self) -> f32 {
        self.delay_seconds
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }
}

impl GraphNode for FeedbackDelayNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let delay_samples = (self.delay_seconds * ctx.sample_rate).round() as usize;

        for sample in out.iter_mut() {
            let delayed = self.delay_line.read(delay_samples);
            self.delay_line.write(*sample + delayed * self.feedback);
            *sample = blend_dry_wet(*sample, delayed, self.mix);
        }
    }
}
