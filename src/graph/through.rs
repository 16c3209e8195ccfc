use crate::graph::node::{GraphNode, RenderCtx};

/*
Through
=======

Serial chaining: the source renders into the block, then the effect
processes that block in place.

  [Source] ──→ [Effect] ──→ out

Every instrument chain in the mixer is built from this, e.g.

  guitar voices ──→ chorus
  synth voices  ──→ feedback delay
  metal hat     ──→ 8 kHz high-pass

Activity is the source's: an effect tail is allowed to ring out on the bus,
but the voice that fed it is done when its own envelope is.
*/

pub struct Through<S, F> {
    source: S,
    effect: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, effect: F) -> Self {
        Self { source, effect }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn effect(&self) -> &F {
        &self.effect
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.effect.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.effect.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.source.get_envelope_level()
    }
}
