use crate::dsp::buffer::multiply_in_place;
use crate::graph::node::{GraphNode, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/*
Amplify
=======

Multiplies a signal by a control signal, sample by sample:

  [Signal] ──┬──→ (×) ──→ out
  [Mod]    ──┘

With an envelope as the modulator this is the VCA of every voice in the
mixer. The modulator decides when the node is finished: once the amp
envelope is idle the voice is silent no matter what the oscillator does,
so `is_active` and the reported envelope level both come from it.
*/

pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    mod_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            mod_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        let control = &mut self.mod_buffer[..out.len()];
        self.modulator.render_block(control, ctx);
        multiply_in_place(out, control);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.modulator.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.signal.note_off(ctx);
        self.modulator.note_off(ctx);
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.modulator.get_envelope_level()
    }

    fn is_active(&self) -> bool {
        self.modulator.is_active()
    }
}
