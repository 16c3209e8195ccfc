//! The fixed set of instruments and the loops each one can play.
//!
//! Everything here is immutable data built once per process. The grid UI
//! draws one row per instrument and one column per sequence; the mixer
//! resolves a `{instrument, sequence index}` pair against it on every
//! rebuild.

mod sequences;

use std::{
    fmt,
    sync::{Arc, OnceLock},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sequencing::{Duration, Position};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InstrumentKey {
    Guitar,
    Synth,
    Bass,
    Drums,
}

impl InstrumentKey {
    /// Row order of the grid.
    pub const ALL: [InstrumentKey; 4] = [
        InstrumentKey::Guitar,
        InstrumentKey::Synth,
        InstrumentKey::Bass,
        InstrumentKey::Drums,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKey::Guitar => "guitar",
            InstrumentKey::Synth => "synth",
            InstrumentKey::Bass => "bass",
            InstrumentKey::Drums => "drums",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for InstrumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrumHit {
    Kick,
    Snare,
    Hat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Melodic { notes: Vec<u8> },
    Drum { hit: DrumHit },
}

/// One trigger inside a loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub time: Position,
    pub kind: EventKind,
    pub duration: Option<Duration>,
    pub velocity: Option<f32>,
}

impl Event {
    pub fn melodic(time: Position, notes: &[u8], duration: Duration) -> Self {
        Self {
            time,
            kind: EventKind::Melodic {
                notes: notes.to_vec(),
            },
            duration: Some(duration),
            velocity: None,
        }
    }

    pub fn drum(time: Position, hit: DrumHit) -> Self {
        Self {
            time,
            kind: EventKind::Drum { hit },
            duration: None,
            velocity: None,
        }
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = Some(velocity.clamp(0.0, 1.0));
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub name: String,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentDefinition {
    pub key: InstrumentKey,
    pub display_name: String,
    pub sequences: Vec<Sequence>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    instruments: Vec<InstrumentDefinition>,
}

static BUILTIN: OnceLock<Arc<Catalog>> = OnceLock::new();

impl Catalog {
    pub fn new(instruments: Vec<InstrumentDefinition>) -> Self {
        Self { instruments }
    }

    /// The shipped instruments and loops, built on first use and shared.
    pub fn builtin() -> Arc<Catalog> {
        BUILTIN
            .get_or_init(|| Arc::new(Catalog::new(sequences::instruments())))
            .clone()
    }

    pub fn instruments(&self) -> &[InstrumentDefinition] {
        &self.instruments
    }

    pub fn get(&self, key: InstrumentKey) -> Option<&InstrumentDefinition> {
        self.instruments.iter().find(|def| def.key == key)
    }

    pub fn sequence(&self, key: InstrumentKey, index: usize) -> Option<&Sequence> {
        self.get(key)?.sequences.get(index)
    }

    pub fn sequence_count(&self, key: InstrumentKey) -> usize {
        self.get(key).map_or(0, |def| def.sequences.len())
    }

    /// Width of the interactive grid.
    pub fn max_columns(&self) -> usize {
        self.instruments
            .iter()
            .map(|def| def.sequences.len())
            .max()
            .unwrap_or(0)
    }
}
