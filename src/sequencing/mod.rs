//! Musical time and pitch: note lengths, loop positions and note numbers.

pub mod duration;
pub mod pitch;
pub mod position;

pub use duration::Duration;
pub use pitch::{midi_to_freq, note, PitchClass};
pub use position::Position;
