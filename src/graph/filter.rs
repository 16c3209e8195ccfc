use crate::dsp::filter::{FilterType, SVFilter};
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/// Filter stage exposed as a graph node. `stages` identical SVFs run in
/// series, each adding 12 dB/octave of roll-off.
pub struct FilterNode {
    stages: Vec<SVFilter>,
    base_cutoff: f32,
    base_resonance: f32,
}

#[derive(Clone, Copy, Debug)]
pub enum FilterParam {
    Cutoff,
    Resonance,
}

impl FilterNode {
    pub fn new(filter_type: FilterType, cutoff_hz: f32, stages: usize) -> Self {
        Self {
            stages: (0..stages.max(1))
                .map(|_| SVFilter::new(filter_type, cutoff_hz))
                .collect(),
            base_cutoff: cutoff_hz,
            base_resonance: 0.0,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz, 1)
    }

    /// Two cascaded stages, -24 dB/octave.
    pub fn lowpass_24db(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz, 2)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz, 1)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff_hz, 1)
    }

    pub fn with_resonance(mut self, resonance: f32) -> Self {
        self.base_resonance = resonance;
        self.stages.iter_mut().for_each(|s| s.set_resonance(resonance));
        self
    }

    /// Cutoff currently in effect (after modulation).
    pub fn cutoff(&self) -> f32 {
        self.stages[0].cutoff()
    }

    pub fn filter_type(&self) -> FilterType {
        self.stages[0].filter_type()
    }

    pub fn slope_db(&self) -> usize {
        self.stages.len() * 12
    }
}

impl Modulatable for FilterNode {
    type Param = FilterParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            FilterParam::Cutoff => self.base_cutoff,
            FilterParam::Resonance => self.base_resonance,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        let value = base + modulation;
        match param {
            FilterParam::Cutoff => {
                let cutoff = value.clamp(20.0, 20_000.0);
                self.stages.iter_mut().for_each(|s| s.set_cutoff(cutoff));
            }
            FilterParam::Resonance => {
                let resonance = value.clamp(0.0, 0.98);
                self.stages.iter_mut().for_each(|s| s.set_resonance(resonance));
            }
        }
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        for stage in &mut self.stages {
            stage.render(out, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::oscillator::OscNode;

    fn energy_through(mut filter: FilterNode, freq: f32) -> f32 {
        let ctx = RenderCtx::from_freq(48_000.0, freq, 1.0);
        let mut osc = OscNode::sine();
        let mut block = vec![0.0; 2048];
        osc.render_block(&mut block, &ctx);
        filter.render_block(&mut block, &ctx);
        block[256..].iter().map(|s| s * s).sum()
    }

    #[test]
    fn steeper_slope_attenuates_more() {
        let gentle = energy_through(FilterNode::lowpass(200.0), 1_600.0);
        let steep = energy_through(FilterNode::lowpass_24db(200.0), 1_600.0);
        assert!(steep < gentle * 0.2, "gentle {gentle}, steep {steep}");
    }

    #[test]
    fn modulation_moves_every_stage() {
        let mut filter = FilterNode::lowpass_24db(80.0);
        filter.apply_modulation(FilterParam::Cutoff, 80.0, 240.0);
        assert_eq!(filter.cutoff(), 320.0);
        assert!(filter.stages.iter().all(|s| s.cutoff() == 320.0));
        assert_eq!(filter.get_param(FilterParam::Cutoff), 80.0);
    }

    #[test]
    fn slope_reporting() {
        assert_eq!(FilterNode::highpass(8_000.0).slope_db(), 12);
        assert_eq!(FilterNode::lowpass_24db(200.0).slope_db(), 24);
    }
}
