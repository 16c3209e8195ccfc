use crate::dsp::ramp::LinearRamp;
use crate::graph::node::{GraphNode, RenderCtx};

/// Gain stage with a glide-able level.
///
/// Used for every bus in the mixer: per-instrument buses (driven by the
/// volume sliders), the unity mix bus, the master and the ambient bed.
pub struct GainNode {
    gain: LinearRamp,
}

impl GainNode {
    pub fn new(gain: f32) -> Self {
        Self {
            gain: LinearRamp::new(gain),
        }
    }

    /// Level right now. Mid-ramp this is between the old and new value.
    pub fn gain(&self) -> f32 {
        self.gain.value()
    }

    /// Level the node is heading to.
    pub fn target(&self) -> f32 {
        self.gain.target()
    }

    pub fn ramp_to(&mut self, target: f32, seconds: f32, sample_rate: f32) {
        self.gain.ramp_to(target, seconds, sample_rate);
    }
}

impl GraphNode for GainNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        if !self.gain.is_ramping() {
            crate::dsp::buffer::apply_gain(out, self.gain.value());
            return;
        }

        for sample in out.iter_mut() {
            *sample *= self.gain.next_sample();
        }
    }
}
