use std::fmt;

/// Musical position inside a loop, `bars:beats:sixteenths`, in 4/4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub bars: u32,
    pub beats: u32,
    pub sixteenths: u32,
}

pub const BEATS_PER_BAR: u32 = 4;
const SIXTEENTHS_PER_BEAT: u32 = 4;

impl Position {
    pub const ZERO: Position = Position::new(0, 0, 0);

    pub const fn new(bars: u32, beats: u32, sixteenths: u32) -> Self {
        Position {
            bars,
            beats,
            sixteenths,
        }
    }

    pub fn to_ticks(&self, ppq: u32) -> u64 {
        let beats = (self.bars * BEATS_PER_BAR + self.beats) as u64;
        beats * ppq as u64 + self.sixteenths as u64 * ppq as u64 / SIXTEENTHS_PER_BEAT as u64
    }

    /// Nearest position at sixteenth resolution.
    pub fn from_ticks(ticks: u64, ppq: u32) -> Self {
        let sixteenth = (ppq / SIXTEENTHS_PER_BEAT).max(1) as u64;
        let total = ticks / sixteenth;
        let per_bar = (BEATS_PER_BAR * SIXTEENTHS_PER_BEAT) as u64;

        Position {
            bars: (total / per_bar) as u32,
            beats: ((total % per_bar) / SIXTEENTHS_PER_BEAT as u64) as u32,
            sixteenths: (total % SIXTEENTHS_PER_BEAT as u64) as u32,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.bars, self.beats, self.sixteenths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks() {
        assert_eq!(Position::ZERO.to_ticks(480), 0);
        assert_eq!(Position::new(0, 1, 0).to_ticks(480), 480);
        assert_eq!(Position::new(1, 0, 2).to_ticks(480), 1920 + 240);
    }

    #[test]
    fn from_ticks_inverts() {
        let pos = Position::new(1, 3, 1);
        assert_eq!(Position::from_ticks(pos.to_ticks(480), 480), pos);
        assert_eq!(pos.to_string(), "1:3:1");
    }
}
