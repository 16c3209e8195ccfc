use crate::dsp::compressor::Compressor;
use crate::graph::node::{GraphNode, RenderCtx};

/// Bus compressor glued between the reverb and the master gain.
///
/// Like `ReverbNode`, the detector coefficients depend on the sample rate and
/// are built on first render.
pub struct CompressorNode {
    compressor: Option<Compressor>,
    sample_rate: f32,
    threshold_db: f32,
    ratio: f32,
    attack: f32,
    release: f32,
}

impl CompressorNode {
    pub fn new(threshold_db: f32, ratio: f32, attack: f32, release: f32) -> Self {
        Self {
            compressor: None,
            sample_rate: 0.0,
            threshold_db,
            ratio,
            attack,
            release,
        }
    }

    pub fn threshold_db(&self) -> f32 {
        self.threshold_db
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Gain reduction currently applied, 1.0 when idle.
    pub fn current_gain(&self) -> f32 {
        self.compressor.as_ref().map_or(1.0, Compressor::current_gain)
    }
}

impl GraphNode for CompressorNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if self.sample_rate != ctx.sample_rate {
            self.sample_rate = ctx.sample_rate;
            self.compressor = Some(Compressor::new(
                ctx.sample_rate,
                self.threshold_db,
                self.ratio,
                self.attack,
                self.release,
            ));
        }

        if let Some(compressor) = self.compressor.as_mut() {
            for sample in out.iter_mut() {
                *sample = compressor.process(*sample);
            }
        }
    }
}
