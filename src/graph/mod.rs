//! Composable building blocks for the mixer's signal graph.
//!
//! Graph nodes wrap the low-level DSP primitives with what instruments and
//! buses need: note events, modulation, and block-based rendering. The
//! `extensions` module adds the fluent helpers voices are written with.

/// Multiply a signal by a control signal (the voice VCA).
pub mod amplify;
/// Swept-delay chorus for the guitar part.
pub mod chorus;
/// Bus compressor for the master chain.
pub mod compressor;
/// Tempo-synced feedback delay for the synth part.
pub mod delay;
/// Envelope generator node exposing ADSR state.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.through()`, `.modulate()`).
pub mod extensions;
/// Multi-stage filter node.
pub mod filter;
/// Bus gain with linear ramps.
pub mod gain;
/// Connect modulation sources to node parameters.
pub mod modulate;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators and noise sources.
pub mod oscillator;
/// Room reverb for the master chain.
pub mod reverb;
/// Serial chaining of two nodes (source → effect).
pub mod through;
