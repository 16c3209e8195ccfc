//! Bass voice.
//!
//! Square wave into a steep (-24 dB/octave) low-pass whose cutoff is pushed
//! by its own envelope: it rests at 80 Hz and opens two octaves, to 320 Hz,
//! on every note before settling back. That short filter "blip" is what
//! gives each bass note its attack.
//!
//! ```text
//! square ──→ LP 24dB ──→ × amp env ──→ out
//!              ↑
//!          filter env (80 Hz + 240 Hz × level)
//! ```
//!
//! Played monophonically; only the first note of a chord event is used.

use crate::graph::{
    envelope::EnvNode,
    extensions::NodeExt,
    filter::{FilterNode, FilterParam},
    node::GraphNode,
    oscillator::OscNode,
};

pub const BASS_VOLUME_DB: f32 = -6.0;

const FILTER_BASE_HZ: f32 = 80.0;
const FILTER_OCTAVES: f32 = 2.0;

pub fn bass() -> impl GraphNode {
    let sweep = FILTER_BASE_HZ * (2f32.powf(FILTER_OCTAVES) - 1.0);

    OscNode::square()
        .through(FilterNode::lowpass_24db(FILTER_BASE_HZ).modulate(
            EnvNode::adsr(0.01, 0.2, 0.2, 0.6),
            FilterParam::Cutoff,
            sweep,
        ))
        .amplify(EnvNode::adsr(0.01, 0.3, 0.4, 0.8))
}
