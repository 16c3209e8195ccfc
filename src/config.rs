//! Mixer settings.
//!
//! Defaults reproduce the installation as shipped: 84 BPM, a two-bar loop,
//! and the master chain values the sound was tuned with. With the `serde`
//! feature a partial JSON object overrides any subset of fields.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, BPM, DEFAULT_SAMPLE_RATE, LOOP_BARS, PPQ};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct MixConfig {
    pub sample_rate: f32,
    pub bpm: f64,
    pub loop_bars: u32,
    pub ppq: u32,
    /// Seconds a volume slider move takes to reach its new gain.
    pub volume_ramp_seconds: f32,
    pub master_gain: f32,
    pub reverb_decay: f32,
    pub reverb_wet: f32,
    pub compressor_threshold_db: f32,
    pub compressor_ratio: f32,
    pub compressor_attack: f32,
    pub compressor_release: f32,
    pub ambient_enabled: bool,
    pub ambient_gain: f32,
    /// Voices per polyphonic synth (guitar, synth pad).
    pub polyphony: usize,
    /// Seed for randomised selections and noise; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bpm: BPM,
            loop_bars: LOOP_BARS,
            ppq: PPQ,
            volume_ramp_seconds: 0.1,
            master_gain: 0.7,
            reverb_decay: 7.0,
            reverb_wet: 0.35,
            compressor_threshold_db: -18.0,
            compressor_ratio: 3.0,
            compressor_attack: 0.01,
            compressor_release: 0.25,
            ambient_enabled: true,
            ambient_gain: 0.02,
            polyphony: 8,
            seed: None,
        }
    }
}

impl MixConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn with_loop_bars(mut self, bars: u32) -> Self {
        self.loop_bars = bars;
        self
    }

    pub fn with_volume_ramp(mut self, seconds: f32) -> Self {
        self.volume_ramp_seconds = seconds;
        self
    }

    pub fn with_ambient(mut self, enabled: bool) -> Self {
        self.ambient_enabled = enabled;
        self
    }

    pub fn with_polyphony(mut self, voices: usize) -> Self {
        self.polyphony = voices;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Loop length in transport ticks.
    pub fn loop_ticks(&self) -> u64 {
        crate::sequencing::Duration::bars(self.loop_bars).to_ticks(self.ppq)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate > 0.0) {
            return Err(ConfigError::invalid("sample_rate", "must be positive"));
        }
        if !(self.bpm > 0.0) {
            return Err(ConfigError::invalid("bpm", "must be positive"));
        }
        if self.loop_bars == 0 {
            return Err(ConfigError::invalid("loop_bars", "loop must be at least one bar"));
        }
        if self.ppq < 4 {
            return Err(ConfigError::invalid("ppq", "need at least sixteenth resolution"));
        }
        if self.volume_ramp_seconds < 0.0 {
            return Err(ConfigError::invalid("volume_ramp_seconds", "cannot be negative"));
        }
        if self.polyphony == 0 {
            return Err(ConfigError::invalid("polyphony", "need at least one voice"));
        }

        let unit_gains = [
            ("master_gain", self.master_gain),
            ("reverb_wet", self.reverb_wet),
            ("ambient_gain", self.ambient_gain),
        ];
        for (field, value) in unit_gains {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(field, format!("{value} is outside [0, 1]")));
            }
        }
        if self.compressor_ratio < 1.0 {
            return Err(ConfigError::invalid("compressor_ratio", "must be at least 1"));
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MixConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MixConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.loop_ticks(), 2 * 4 * 480);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(MixConfig::default().with_bpm(0.0).validate().is_err());
        assert!(MixConfig::default().with_loop_bars(0).validate().is_err());
        assert!(MixConfig::default().with_polyphony(0).validate().is_err());

        let mut config = MixConfig::default();
        config.master_gain = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("master_gain"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_overrides_defaults() {
        let config = MixConfig::from_json_str(r#"{ "bpm": 90.0, "ambient_enabled": false }"#).unwrap();
        assert_eq!(config.bpm, 90.0);
        assert!(!config.ambient_enabled);
        assert_eq!(config.master_gain, 0.7);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_is_validated() {
        assert!(MixConfig::from_json_str(r#"{ "sample_rate": -1.0 }"#).is_err());
        assert!(MixConfig::from_json_str("not json").is_err());
    }
}
