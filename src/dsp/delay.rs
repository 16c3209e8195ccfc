use crate::MAX_DELAY_SAMPLES;

/// Circular buffer shared by the chorus and the feedback delay.
///
/// Reads are expressed as "samples ago" relative to the next write, so the
/// caller always reads before writing the current input.
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    pub fn new() -> Self {
        Self {
            buffer: vec![0.0; MAX_DELAY_SAMPLES],
            write_pos: 0,
        }
    }

    /// Sample written `delay_samples` writes ago.
    #[inline]
    pub fn read(&self, delay_samples: usize) -> f32 {
        let delay = delay_samples.clamp(1, MAX_DELAY_SAMPLES - 1);
        let read_pos = (self.write_pos + MAX_DELAY_SAMPLES - delay) % MAX_DELAY_SAMPLES;
        self.buffer[read_pos]
    }

    /// Linear interpolation between the two neighbouring taps.
    ///
    /// Needed when the delay time is modulated (chorus), otherwise the read
    /// head jumps between integer positions and zippers.
    #[inline]
    pub fn read_interpolated(&self, delay_samples: f32) -> f32 {
        let delay = delay_samples.clamp(1.0, (MAX_DELAY_SAMPLES - 2) as f32);
        let whole = delay.floor() as usize;
        let frac = delay - whole as f32;

        let a = self.read(whole);
        let b = self.read(whole + 1);
        a + (b - a) * frac
    }

    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % MAX_DELAY_SAMPLES;
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

impl Default for DelayLine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_comes_back_after_delay() {
        let mut line = DelayLine::new();
        line.write(1.0);
        for _ in 0..9 {
            line.write(0.0);
        }

        assert_eq!(line.read(10), 1.0);
        assert_eq!(line.read(9), 0.0);
    }

    #[test]
    fn interpolated_read_blends_neighbours() {
        let mut line = DelayLine::new();
        line.write(1.0);
        line.write(0.0);

        // read(2) = 1.0, read(1) = 0.0
        let mid = line.read_interpolated(1.5);
        assert!((mid - 0.5).abs() < 1e-6);
    }

    #[test]
    fn reset_clears_history() {
        let mut line = DelayLine::new();
        line.write(0.8);
        line.reset();
        assert_eq!(line.read(1), 0.0);
    }
}
