//! The instrument patches the mixer plays.
//!
//! Each function returns a fresh node graph for one voice; synths call them
//! once per polyphonic slot. Effects and bus routing are added by the mixer's
//! chain builder, not here.
//!
//! ```ignore
//! use facade_mix::voices;
//!
//! let pluck = voices::guitar();
//! let kick = voices::kick();
//! let bed = voices::wind(7);
//! ```

mod bass;
mod guitar;
mod hat;
mod kick;
mod pad;
mod snare;
mod wind;

pub use bass::{bass, BASS_VOLUME_DB};
pub use guitar::{guitar, GUITAR_VOLUME_DB};
pub use hat::{hat, MetalNode, HAT_FILTER_HZ, HAT_VOLUME_DB};
pub use kick::{kick, MembraneNode};
pub use pad::{pad, PAD_VOLUME_DB};
pub use snare::snare;
pub use wind::{wind, WIND_CUTOFF_HZ};
