use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
State-variable filter (TPT form)
================================

Two trapezoidal integrators give all four responses from the same state:

| response  | output                   | used by                        |
| --------- | ------------------------ | ------------------------------ |
| low-pass  | v2                       | bass, wind                     |
| high-pass | x - k*v1 - v2            | hat filter                     |
| band-pass | v1                       | metal hat body                 |
| notch     | x - k*v1                 | (available, unused by voices)  |

`g` is the prewarped integrator gain, `k` the damping (2 = no resonance).
Cutoff is clamped just under Nyquist so `tan` never blows up.

A single stage rolls off at 12 dB/octave. The bass voice needs 24 dB, which
`FilterNode` gets by running two stages in series.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

#[derive(Debug, Clone)]
pub struct SVFilter {
    ic1eq: f32,
    ic2eq: f32,
    cutoff_hz: f32,
    resonance: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            resonance: 0.0,
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff_hz)
    }

    #[inline]
    fn coefficients(&self, sample_rate: f32) -> (f32, f32) {
        let cutoff = self.cutoff_hz.clamp(10.0, sample_rate * 0.49);
        let g = (PI * cutoff / sample_rate).tan();
        let k = 2.0 - 2.0 * self.resonance.clamp(0.0, 0.98);
        (g, k)
    }

    #[inline]
    pub fn tick(&mut self, sample: f32, g: f32, k: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;
        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    /// Filter `buffer` in place with the current cutoff.
    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        let (g, k) = self.coefficients(ctx.sample_rate);
        for sample in buffer.iter_mut() {
            let out = self.tick(*sample, g, k);
            *sample = match self.filter_type {
                FilterType::LowPass => out.lowpass,
                FilterType::HighPass => out.highpass,
                FilterType::BandPass => out.bandpass,
                FilterType::Notch => out.notch,
            };
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }

    /// 0.0 = flat, values near 1.0 ring.
    pub fn set_resonance(&mut self, resonance: f32) {
        self.resonance = resonance;
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }
}
