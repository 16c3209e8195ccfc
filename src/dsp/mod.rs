//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free once constructed, so they can live
//! inside voices and effect nodes that render on the audio thread. They stay
//! focused on the signal math; routing and note handling live in `graph`.

/// In-place block arithmetic (gain, summing, levels).
pub mod buffer;
/// Feed-forward dynamics for the master chain.
pub mod compressor;
/// Circular delay line with interpolated reads.
pub mod delay;
/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// State-variable filter with multiple responses.
pub mod filter;
/// Oscillator waveforms and coloured noise.
pub mod oscillator;
/// Linear parameter glides.
pub mod ramp;
/// Decay-sized Schroeder reverb.
pub mod reverb;

pub use envelope::EnvelopeStage;
