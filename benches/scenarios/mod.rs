//! Real-world scenario benchmarks.
//!
//! Complete instrument chains as the mixer builds them, and the mixer
//! itself rendering the loop with every part enabled.

mod mix;
mod voices;

pub use mix::bench_mix;
pub use voices::bench_voices;
