/// Feed-forward peak compressor.
///
/// A one-pole envelope follower tracks the input level with separate attack
/// and release coefficients; above the threshold the gain is reduced so the
/// output rises by `1 / ratio` dB per input dB.
#[derive(Debug, Clone)]
pub struct Compressor {
    threshold: f32,
    ratio: f32,
    attack_coeff: f32,
    release_coeff: f32,
    envelope: f32,
}

/// Linear gain for a level in decibels.
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

#[inline]
pub fn gain_to_db(gain: f32) -> f32 {
    20.0 * gain.max(1e-9).log10()
}

fn time_coeff(seconds: f32, sample_rate: f32) -> f32 {
    1.0 - (-1.0 / (seconds.max(1e-4) * sample_rate)).exp()
}

impl Compressor {
    pub fn new(
        sample_rate: f32,
        threshold_db: f32,
        ratio: f32,
        attack_seconds: f32,
        release_seconds: f32,
    ) -> Self {
        Self {
            threshold: db_to_gain(threshold_db),
            ratio: ratio.max(1.0),
            attack_coeff: time_coeff(attack_seconds, sample_rate),
            release_coeff: time_coeff(release_seconds, sample_rate),
            envelope: 0.0,
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let level = input.abs();
        let coeff = if level > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope += coeff * (level - self.envelope);

        input * self.current_gain()
    }

    /// Gain the compressor is applying right now.
    pub fn current_gain(&self) -> f32 {
        if self.envelope > self.threshold {
            (self.envelope / self.threshold).powf(1.0 / self.ratio - 1.0)
        } else {
            1.0
        }
    }

    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_signal_passes_untouched() {
        let mut comp = Compressor::new(48_000.0, -18.0, 3.0, 0.01, 0.25);
        for _ in 0..4_800 {
            let out = comp.process(0.05);
            assert!((out - 0.05).abs() < 1e-6);
        }
    }

    #[test]
    fn loud_signal_is_reduced_by_ratio() {
        let mut comp = Compressor::new(48_000.0, -18.0, 3.0, 0.01, 0.25);
        let input = db_to_gain(-6.0);
        let mut out = 0.0;
        for _ in 0..48_000 {
            out = comp.process(input);
        }

        // 12 dB over threshold comes out 4 dB over
        let expected = -18.0 + 12.0 / 3.0;
        assert!((gain_to_db(out) - expected).abs() < 0.5, "got {}", gain_to_db(out));
    }

    #[test]
    fn db_conversions_round_trip() {
        assert!((gain_to_db(db_to_gain(-8.0)) + 8.0).abs() < 1e-4);
        assert!((db_to_gain(0.0) - 1.0).abs() < 1e-6);
    }
}
