use crate::dsp::buffer::block_average;
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Modulate
========

Drives one parameter of a node from another node's output:

  param = base + depth * mean(modulator block)

The modulator is read once per block. The mixer splits its render blocks at
every scheduled event, so an envelope restarted by a note always starts a
fresh block.

The bass filter envelope is the case this exists for: a low-pass whose
cutoff sits at 80 Hz and opens two octaves (to 320 Hz) on each note.

  FilterNode::lowpass_24db(80.0)
      .modulate(EnvNode::adsr(0.01, 0.2, 0.2, 0.6), FilterParam::Cutoff, 240.0)
*/

pub struct Modulate<S, M>
where
    S: GraphNode + Modulatable,
    M: GraphNode,
{
    source: S,
    modulator: M,
    param: S::Param,
    base: f32,
    depth: f32,
    mod_buffer: Vec<f32>,
}

impl<S, M> Modulate<S, M>
where
    S: GraphNode + Modulatable,
    M: GraphNode,
{
    pub fn new(source: S, modulator: M, param: S::Param, depth: f32) -> Self {
        let base = source.get_param(param);
        Self {
            source,
            modulator,
            param,
            base,
            depth,
            mod_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S, M> GraphNode for Modulate<S, M>
where
    S: GraphNode + Modulatable,
    M: GraphNode,
{
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let control = &mut self.mod_buffer[..out.len()];
        self.modulator.render_block(control, ctx);

        let amount = block_average(control) * self.depth;
        self.source.apply_modulation(self.param, self.base, amount);
        self.source.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.modulator.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.modulator.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.source.get_envelope_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{
        envelope::EnvNode,
        extensions::NodeExt,
        filter::{FilterNode, FilterParam},
    };

    #[test]
    fn envelope_opens_the_filter() {
        let ctx = RenderCtx::at_rate(1_000.0);
        let mut node = FilterNode::lowpass(80.0).modulate(
            EnvNode::adsr(0.001, 1.0, 1.0, 0.1),
            FilterParam::Cutoff,
            240.0,
        );

        let mut block = vec![0.0; 8];
        node.render_block(&mut block, &ctx);
        assert_eq!(node.source().cutoff(), 80.0);

        node.note_on(&ctx);
        node.render_block(&mut block, &ctx);
        assert!(node.source().cutoff() > 200.0);
    }

    #[test]
    fn huge_depth_stays_finite() {
        let ctx = RenderCtx::at_rate(48_000.0);
        let mut node = FilterNode::lowpass(1_000.0).modulate(
            EnvNode::adsr(0.001, 0.1, 1.0, 0.1),
            FilterParam::Cutoff,
            1.0e6,
        );
        node.note_on(&ctx);

        let mut block = vec![0.5; 512];
        node.render_block(&mut block, &ctx);
        assert!(block.iter().all(|s| s.is_finite()));
    }
}
