use crate::{graph::node::RenderCtx, MIN_TIME};

/*
ADSR Envelope
=============

Every voice in the mixer is shaped by one of these: the guitar pluck, the
slow synth pad swell, the bass filter sweep and all three drum hits.

  level
    1.0 ┐   ╱╲
        │  ╱  ╲________
    S   │ ╱            ╲
    0.0 └╱──────────────╲──→ time
         A   D    S      R

Segments are linear. The attack climbs from the level the envelope is at when
the gate opens (zero for a fresh voice), so a retriggered voice that was still
ringing does not click back to silence first.

Stage lengths are converted to per-sample steps on the fly from the render
context's sample rate:

    step = distance / (seconds * sample_rate)

Release is anchored at gate-off: the starting level and the sample count are
captured once and the ramp interpolates from there, which lands exactly on
zero no matter which stage was interrupted.

Percussive shapes use `sustain = 0`: after the decay the level sits at zero
until the gate closes, and the release then finishes immediately.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

#[derive(Debug, Clone)]
pub struct Envelope {
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,

    stage: EnvelopeStage,
    level: f32,

    release_from: f32,
    release_len: u32,
    release_pos: u32,
}

impl Envelope {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(MIN_TIME),
            decay: decay.max(MIN_TIME),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(MIN_TIME),
            stage: EnvelopeStage::Idle,
            level: 0.0,
            release_from: 0.0,
            release_len: 1,
            release_pos: 0,
        }
    }

    /// Attack/decay only, as used by the drum voices.
    pub fn percussive(attack: f32, decay: f32, release: f32) -> Self {
        Self::adsr(attack, decay, 0.0, release)
    }

    /// Gate high.
    pub fn note_on(&mut self, _ctx: &RenderCtx) {
        self.stage = EnvelopeStage::Attack;
        self.release_pos = 0;
    }

    /// Gate low. Starts the release from whatever level we are at.
    pub fn note_off(&mut self, ctx: &RenderCtx) {
        if self.stage == EnvelopeStage::Idle {
            return;
        }

        self.release_from = self.level;
        self.release_len = (self.release * ctx.sample_rate).round().max(1.0) as u32;
        self.release_pos = 0;
        self.stage = EnvelopeStage::Release;
    }

    /// Advance one sample and return the new level.
    pub fn next_sample(&mut self, ctx: &RenderCtx) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => self.level = 0.0,
            EnvelopeStage::Attack => {
                self.level += 1.0 / (self.attack * ctx.sample_rate);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }
            EnvelopeStage::Decay => {
                self.level -= (1.0 - self.sustain) / (self.decay * ctx.sample_rate);
                if self.level <= self.sustain {
                    self.level = self.sustain;
                    self.stage = EnvelopeStage::Sustain;
                }
            }
            EnvelopeStage::Sustain => self.level = self.sustain,
            EnvelopeStage::Release => {
                self.release_pos = self.release_pos.saturating_add(1);
                let progress = self.release_pos as f32 / self.release_len as f32;
                self.level = (self.release_from * (1.0 - progress)).max(0.0);

                if self.release_pos >= self.release_len {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        self.level
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(ctx);
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Idle;
        self.level = 0.0;
        self.release_pos = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }
}
