//! Block-level arithmetic shared by the graph nodes and the mixer.
//!
//! Everything here works in place on `f32` slices and never allocates.

/// Scale a block by a constant gain.
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// `signal[i] *= modulator[i]`, the amplitude-envelope case.
#[inline]
pub fn multiply_in_place(signal: &mut [f32], modulator: &[f32]) {
    debug_assert_eq!(signal.len(), modulator.len());

    for (s, &m) in signal.iter_mut().zip(modulator) {
        *s *= m;
    }
}

/// Add `source` onto `dest`. Used to sum voices into a part and buses into
/// the mix bus.
#[inline]
pub fn sum_in_place(dest: &mut [f32], source: &[f32]) {
    debug_assert_eq!(dest.len(), source.len());

    for (d, &s) in dest.iter_mut().zip(source) {
        *d += s;
    }
}

/// Linear wet/dry blend of a single sample. `mix = 0` is fully dry.
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Mean of a control block, used to turn a modulator into one parameter
/// value per block.
#[inline]
pub fn block_average(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f32>() / samples.len() as f32
}

pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()))
}

pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_and_multiply() {
        let mut signal = [1.0, 0.5, -0.5, -1.0];
        apply_gain(&mut signal, 0.5);
        assert_eq!(signal, [0.5, 0.25, -0.25, -0.5]);

        multiply_in_place(&mut signal, &[2.0, 0.0, 2.0, 1.0]);
        assert_eq!(signal, [1.0, 0.0, -0.5, -0.5]);
    }

    #[test]
    fn summing_accumulates() {
        let mut bus = [0.0; 3];
        sum_in_place(&mut bus, &[0.1, 0.2, 0.3]);
        sum_in_place(&mut bus, &[0.1, 0.2, 0.3]);
        assert!((bus[2] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn dry_wet_endpoints() {
        assert_eq!(blend_dry_wet(0.4, 1.0, 0.0), 0.4);
        assert_eq!(blend_dry_wet(0.4, 1.0, 1.0), 1.0);
    }

    #[test]
    fn levels() {
        assert_eq!(block_average(&[]), 0.0);
        assert_eq!(peak(&[0.2, -0.9, 0.5]), 0.9);
        assert!((rms(&[1.0, -1.0]) - 1.0).abs() < 1e-6);
    }
}
