use crate::dsp::oscillator::{NoiseBlock, NoiseColor, OscillatorBlock, Waveform};
use crate::graph::node::{GraphNode, Modulatable, RenderCtx};

/*
Oscillator Nodes
================

The raw sources every instrument starts from.

  Waveform   Harmonics               Used for
  --------   ---------------------   -----------------------------
  triangle   odd, falling as 1/n²    guitar pluck (soft, round)
  sawtooth   all, falling as 1/n     synth pad (bright, buzzy)
  square     odd, falling as 1/n     bass, metal hat partials
  sine       fundamental only        kick membrane

`OscNode` follows the note pitch in `RenderCtx` unless it is given a fixed
frequency with `with_frequency`, in which case `Modulatable` can push that
frequency around (pitch envelopes).

`NoiseNode` ignores pitch entirely. White, pink and brown colours cover the
snare body and the ambient wind.

  // bass body: square into a low-pass, shaped by an amp envelope
  OscNode::square()
      .through(FilterNode::lowpass(200.0))
      .amplify(EnvNode::adsr(0.01, 0.3, 0.4, 0.8))
*/

pub struct OscNode {
    osc: OscillatorBlock,
    /// If Some, ignores ctx.frequency.
    base_frequency: Option<f32>,
    current_frequency: f32,
    /// 100 cents = 1 semitone.
    detune_cents: f32,
}

#[derive(Clone, Copy, Debug)]
pub enum OscParam {
    Frequency,
    Detune,
}

impl OscNode {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            osc: OscillatorBlock::new(waveform),
            base_frequency: None,
            current_frequency: 440.0,
            detune_cents: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Saw)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    /// Pin the oscillator to `freq` regardless of the note being played.
    pub fn with_frequency(mut self, freq: f32) -> Self {
        self.base_frequency = Some(freq);
        self.current_frequency = freq;
        self
    }

    pub fn with_detune(mut self, cents: f32) -> Self {
        self.detune_cents = cents;
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let base = match self.base_frequency {
            Some(_) => self.current_frequency,
            None => ctx.frequency,
        };
        let frequency = if self.detune_cents != 0.0 {
            base * 2.0_f32.powf(self.detune_cents / 1200.0)
        } else {
            base
        };

        self.osc.render(out, &RenderCtx { frequency, ..*ctx });
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        if let Some(base) = self.base_frequency {
            self.current_frequency = base;
        }
    }
}

impl Modulatable for OscNode {
    type Param = OscParam;

    fn get_param(&self, param: Self::Param) -> f32 {
        match param {
            OscParam::Frequency => self.base_frequency.unwrap_or(440.0),
            OscParam::Detune => self.detune_cents,
        }
    }

    fn apply_modulation(&mut self, param: Self::Param, base: f32, modulation: f32) {
        match param {
            OscParam::Frequency => self.current_frequency = (base + modulation).clamp(20.0, 20_000.0),
            OscParam::Detune => self.detune_cents = (base + modulation).clamp(-1200.0, 1200.0),
        }
    }
}

pub struct NoiseNode {
    noise: NoiseBlock,
}

impl NoiseNode {
    pub fn new(color: NoiseColor, seed: u64) -> Self {
        Self {
            noise: NoiseBlock::new(color, seed),
        }
    }

    pub fn white(seed: u64) -> Self {
        Self::new(NoiseColor::White, seed)
    }

    pub fn pink(seed: u64) -> Self {
        Self::new(NoiseColor::Pink, seed)
    }

    pub fn brown(seed: u64) -> Self {
        Self::new(NoiseColor::Brown, seed)
    }
}

impl GraphNode for NoiseNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        self.noise.render(out);
    }
}
