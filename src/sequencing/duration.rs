use std::fmt;

/// Note length as an exact fraction of a whole note.
///
/// Tempo-dependent conversions (`to_ticks`, `to_seconds`) happen at the edge;
/// the catalog only ever stores the fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    pub numerator: u32,
    pub denominator: u32,
}

impl Duration {
    pub const WHOLE: Duration = Duration::new(1, 1);
    pub const HALF: Duration = Duration::new(1, 2);
    pub const QUARTER: Duration = Duration::new(1, 4);
    pub const EIGHTH: Duration = Duration::new(1, 8);
    pub const SIXTEENTH: Duration = Duration::new(1, 16);

    pub const DOTTED_HALF: Duration = Duration::HALF.dotted();
    pub const DOTTED_QUARTER: Duration = Duration::QUARTER.dotted();
    pub const DOTTED_EIGHTH: Duration = Duration::EIGHTH.dotted();

    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Duration {
            numerator,
            denominator,
        }
    }

    /// `n` whole bars of 4/4.
    pub const fn bars(n: u32) -> Self {
        Duration::new(n, 1)
    }

    /// Half as long again.
    pub const fn dotted(self) -> Self {
        Duration::new(self.numerator * 3, self.denominator * 2).reduce()
    }

    pub const fn reduce(self) -> Self {
        let gcd = const_gcd(self.numerator, self.denominator);
        Duration::new(self.numerator / gcd, self.denominator / gcd)
    }

    /// ticks = numerator * 4 * ppq / denominator
    pub fn to_ticks(&self, ppq: u32) -> u64 {
        (self.numerator as u64 * 4 * ppq as u64) / self.denominator as u64
    }

    /// Seconds at `bpm` quarter notes per minute.
    pub fn to_seconds(&self, bpm: f64) -> f64 {
        let quarters = self.numerator as f64 * 4.0 / self.denominator as f64;
        quarters * 60.0 / bpm
    }
}

impl fmt::Display for Duration {
    /// Tracker-style notation: `8n`, `4n.`, `1m`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.reduce();
        if d.denominator == 1 {
            write!(f, "{}m", d.numerator)
        } else if d.numerator == 1 {
            write!(f, "{}n", d.denominator)
        } else if d.numerator == 3 && d.denominator % 2 == 0 {
            write!(f, "{}n.", d.denominator / 2)
        } else {
            write!(f, "{}/{}", d.numerator, d.denominator)
        }
    }
}

const fn const_gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    if a == 0 {
        1
    } else {
        a
    }
}
