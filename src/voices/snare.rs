//! Snare voice: a burst of pink noise with a fast percussive envelope.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, node::GraphNode, oscillator::NoiseNode};

pub fn snare(seed: u64) -> impl GraphNode {
    NoiseNode::pink(seed).amplify(EnvNode::percussive(0.001, 0.2, 0.1))
}
