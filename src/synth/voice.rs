use crate::graph::node::{GraphNode, RenderCtx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Gate high
    Releasing, // Gate low, envelope still ringing
}

/// One playable copy of an instrument patch.
///
/// Notes from the sequencer always carry a length, so a voice can be started
/// with a hold time in samples and will close its own gate when it runs out,
/// mid-block if need be.
pub struct Voice<T: GraphNode> {
    note: u8,
    frequency: f32,
    velocity: f32,
    state: VoiceState,
    age: u64,
    hold_samples: Option<u64>,
    sample_rate: f32,
    graph: T,
}

impl<T: GraphNode> Voice<T> {
    pub fn new(graph: T, sample_rate: f32) -> Self {
        Self {
            note: 0,
            frequency: 0.0,
            velocity: 0.0,
            state: VoiceState::Free,
            age: 0,
            hold_samples: None,
            sample_rate,
            graph,
        }
    }

    fn ctx(&self) -> RenderCtx {
        RenderCtx::from_freq(self.sample_rate, self.frequency, self.velocity)
    }

    /// Gate high. `hold` is how many samples until the gate closes by itself.
    pub fn start(&mut self, note: u8, velocity: f32, age: u64, hold: Option<u64>) {
        let ctx = RenderCtx::from_note(self.sample_rate, note, velocity);
        self.note = note;
        self.frequency = ctx.frequency;
        self.velocity = velocity.clamp(0.0, 1.0);
        self.state = VoiceState::Active;
        self.age = age;
        self.hold_samples = hold;

        self.graph.note_on(&self.ctx());
    }

    pub fn release(&mut self) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
            self.hold_samples = None;
            let ctx = self.ctx();
            self.graph.note_off(&ctx);
        }
    }

    /// Render into `out`, velocity-scaled. Overwrites the buffer.
    pub fn render(&mut self, out: &mut [f32]) {
        let split = match self.hold_samples {
            Some(hold) if (hold as usize) < out.len() => hold as usize,
            _ => out.len(),
        };

        let ctx = self.ctx();
        let (held, released) = out.split_at_mut(split);
        self.graph.render_block(held, &ctx);
        if let Some(hold) = self.hold_samples.as_mut() {
            *hold -= split as u64;
        }

        if self.hold_samples == Some(0) {
            self.release();
            self.graph.render_block(released, &ctx);
        }

        for sample in out.iter_mut() {
            *sample *= self.velocity;
        }

        if self.state == VoiceState::Releasing && !self.graph.is_active() {
            self.free();
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, VoiceState::Active | VoiceState::Releasing)
    }

    pub fn get_envelope_level(&self) -> Option<f32> {
        self.graph.get_envelope_level()
    }

    pub fn free(&mut self) {
        self.state = VoiceState::Free;
        self.hold_samples = None;
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }
}
