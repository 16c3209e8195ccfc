/// Linear parameter glide.
///
/// `ramp_to` schedules a straight line from the current value to `target`
/// over a fixed number of seconds; `next_sample` walks it. Volume changes go
/// through this so a slider move never steps the bus gain.
#[derive(Debug, Clone)]
pub struct LinearRamp {
    value: f32,
    target: f32,
    step: f32,
    remaining: u32,
}

impl LinearRamp {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            target: value,
            step: 0.0,
            remaining: 0,
        }
    }

    pub fn ramp_to(&mut self, target: f32, seconds: f32, sample_rate: f32) {
        let samples = (seconds * sample_rate).round() as u32;
        if samples == 0 {
            self.set(target);
            return;
        }

        self.target = target;
        self.remaining = samples;
        self.step = (target - self.value) / samples as f32;
    }

    /// Jump immediately, cancelling any glide in progress.
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.step = 0.0;
        self.remaining = 0;
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.value = if self.remaining == 0 {
                self.target
            } else {
                self.value + self.step
            };
        }
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_ramping(&self) -> bool {
        self.remaining > 0
    }
}
