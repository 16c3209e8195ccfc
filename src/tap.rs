//! Level metering from the audio thread to the UI.
//!
//! The audio callback pushes one `Level` per rendered block into a
//! lock-free SPSC ring; the UI drains it each frame and keeps the newest.
//! A full ring drops the reading rather than block the callback.

use rtrb::{Consumer, Producer, RingBuffer};

use crate::dsp::buffer::{peak, rms};

const LEVEL_QUEUE_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Level {
    pub peak: f32,
    pub rms: f32,
}

impl Level {
    pub fn from_block(block: &[f32]) -> Self {
        Self {
            peak: peak(block),
            rms: rms(block),
        }
    }
}

/// Audio-thread end.
pub struct LevelTap {
    tx: Producer<Level>,
}

impl LevelTap {
    pub fn push_block(&mut self, block: &[f32]) {
        let _ = self.tx.push(Level::from_block(block));
    }
}

/// UI-thread end.
pub struct LevelReader {
    rx: Consumer<Level>,
    latest: Level,
}

impl LevelReader {
    /// Drain pending readings and return the newest one seen so far.
    pub fn poll(&mut self) -> Level {
        while let Ok(level) = self.rx.pop() {
            self.latest = level;
        }
        self.latest
    }
}

pub fn level_tap() -> (LevelTap, LevelReader) {
    let (tx, rx) = RingBuffer::<Level>::new(LEVEL_QUEUE_SIZE);
    (
        LevelTap { tx },
        LevelReader {
            rx,
            latest: Level::default(),
        },
    )
}
