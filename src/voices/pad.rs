//! Synth pad voice.
//!
//! Sawtooth with a slow swell and a very long release. On its own it is
//! bright and buzzy; in the mix it is fed through a tempo-synced feedback
//! delay and sits under everything else.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, node::GraphNode, oscillator::OscNode};

pub const PAD_VOLUME_DB: f32 = -12.0;

pub fn pad() -> impl GraphNode {
    OscNode::sawtooth().amplify(EnvNode::adsr(0.4, 0.6, 0.65, 2.8))
}
