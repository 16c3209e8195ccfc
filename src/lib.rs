//! Panel-driven loop mixer.
//!
//! A grid of panels (rows are instruments, columns are loop variants) toggles
//! looping parts on and off. Every change tears the signal graph down and
//! rebuilds it from the current selection, and all parts play against one
//! shared clock:
//!
//! ```text
//! voices ──→ effect ──→ bus ──┐
//! voices ──→ effect ──→ bus ──┼──→ mix bus ──→ reverb ──→ compressor ──→ master ──┬──→ out
//! drums  ──────────────→ bus ──┘                                                 │
//! wind ──→ low-pass ──→ gain ────────────────────────────────────────────────────┘
//! ```
//!
//! `session::FacadeSession` is the front-end contract; `mixer::GraphManager`
//! owns the graph and the transport.

pub mod catalog;
pub mod config;
pub mod dsp;
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod mixer;
pub mod selection;
pub mod sequencing; // Musical timing and pitch
pub mod session;
pub mod synth; // Voice management and polyphony
#[cfg(feature = "rtrb")]
pub mod tap;
pub mod transport;
pub mod voices;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
/// Two seconds at 48 kHz.
pub const MAX_DELAY_SAMPLES: usize = 96_000;

pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;
pub const BPM: f64 = 84.0;
/// Loop length shared by every part, in bars of 4/4.
pub const LOOP_BARS: u32 = 2;
pub const PPQ: u32 = 480;
