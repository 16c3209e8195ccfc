//! Schroeder reverb sized by decay time.
//!
//! ```text
//! in ──┬──→ [comb 1] ──┐
//!      ├──→ [comb 2] ──┤
//!      ├──→ [comb 3] ──┼──→ (+) ──→ [allpass 1] ──→ [allpass 2] ──→ out
//!      └──→ [comb 4] ──┘
//! ```
//!
//! The master chain specifies its room by decay in seconds rather than an
//! abstract "room size", so each comb's feedback is derived from the RT60
//! formula: after `decay` seconds a comb's recirculating energy is down 60 dB.
//!
//! ```text
//! g = 10 ^ (-3 * delay_seconds / decay_seconds)
//! ```

const COMB_DELAYS_MS: [f32; 4] = [29.7, 37.1, 41.1, 43.7];
const ALLPASS_DELAYS_MS: [f32; 2] = [5.0, 1.7];
const ALLPASS_GAIN: f32 = 0.5;

fn ms_to_samples(ms: f32, sample_rate: f32) -> usize {
    ((ms * sample_rate / 1000.0) as usize).max(1)
}

/// Feedback comb with a one-pole low-pass in the loop.
pub struct CombFilter {
    buffer: Vec<f32>,
    pos: usize,
    feedback: f32,
    damp: f32,
    store: f32,
}

impl CombFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            pos: 0,
            feedback: 0.5,
            damp: 0.3,
            store: 0.0,
        }
    }

    pub fn delay_samples(&self) -> usize {
        self.buffer.len()
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
    }

    pub fn set_damp(&mut self, damp: f32) {
        self.damp = damp.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let out = self.buffer[self.pos];
        self.store = out * (1.0 - self.damp) + self.store * self.damp;
        self.buffer[self.pos] = input + self.store * self.feedback;
        self.pos = (self.pos + 1) % self.buffer.len();
        out
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.store = 0.0;
        self.pos = 0;
    }
}

pub struct AllpassFilter {
    buffer: Vec<f32>,
    pos: usize,
    gain: f32,
}

impl AllpassFilter {
    pub fn new(delay_samples: usize, gain: f32) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            pos: 0,
            gain: gain.clamp(0.0, 0.9),
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.buffer[self.pos];
        let out = -self.gain * input + delayed;
        self.buffer[self.pos] = input + self.gain * out;
        self.pos = (self.pos + 1) % self.buffer.len();
        out
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.pos = 0;
    }
}

pub struct SchroederReverb {
    sample_rate: f32,
    combs: [CombFilter; 4],
    allpasses: [AllpassFilter; 2],
}

impl SchroederReverb {
    pub fn new(sample_rate: f32, decay_seconds: f32) -> Self {
        let combs = COMB_DELAYS_MS.map(|ms| CombFilter::new(ms_to_samples(ms, sample_rate)));
        let allpasses =
            ALLPASS_DELAYS_MS.map(|ms| AllpassFilter::new(ms_to_samples(ms, sample_rate), ALLPASS_GAIN));

        let mut reverb = Self {
            sample_rate,
            combs,
            allpasses,
        };
        reverb.set_decay(decay_seconds);
        reverb
    }

    /// Retune every comb so the tail falls 60 dB over `decay_seconds`.
    pub fn set_decay(&mut self, decay_seconds: f32) {
        let decay = decay_seconds.max(0.01);
        for comb in &mut self.combs {
            let delay_seconds = comb.delay_samples() as f32 / self.sample_rate;
            comb.set_feedback(10f32.powf(-3.0 * delay_seconds / decay));
        }
    }

    pub fn set_damping(&mut self, damp: f32) {
        for comb in &mut self.combs {
            comb.set_damp(damp);
        }
    }

    /// Fully wet output for one input sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut out = 0.0;
        for comb in &mut self.combs {
            out += comb.process(input);
        }
        out *= 0.25;

        for allpass in &mut self.allpasses {
            out = allpass.process(out);
        }
        out
    }

    pub fn reset(&mut self) {
        self.combs.iter_mut().for_each(CombFilter::reset);
        self.allpasses.iter_mut().for_each(AllpassFilter::reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comb_echoes_after_its_delay() {
        let mut comb = CombFilter::new(10);
        comb.set_feedback(0.5);
        comb.set_damp(0.0);

        assert_eq!(comb.process(1.0), 0.0);
        for _ in 0..9 {
            comb.process(0.0);
        }
        assert!(comb.process(0.0) > 0.9);
    }

    #[test]
    fn longer_decay_means_more_feedback() {
        let short = SchroederReverb::new(48_000.0, 1.0);
        let long = SchroederReverb::new(48_000.0, 7.0);
        assert!(long.combs[0].feedback > short.combs[0].feedback);
    }

    #[test]
    fn impulse_leaves_a_tail() {
        let mut reverb = SchroederReverb::new(48_000.0, 7.0);
        reverb.process(1.0);

        let tail = (0..6_000).map(|_| reverb.process(0.0)).fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(tail > 1e-3);
    }

    #[test]
    fn sustained_input_stays_bounded() {
        let mut reverb = SchroederReverb::new(48_000.0, 7.0);
        for _ in 0..48_000 {
            let out = reverb.process(0.2);
            assert!(out.is_finite() && out.abs() < 10.0);
        }
    }
}
