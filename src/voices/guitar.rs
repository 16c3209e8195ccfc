//! Guitar voice.
//!
//! A soft triangle pluck: quick attack, a short decay into a low sustain and
//! a long release, so chords ring into each other the way an open-strummed
//! guitar does. The chorus that widens it lives on the instrument chain, not
//! in the voice.

use crate::graph::{envelope::EnvNode, extensions::NodeExt, node::GraphNode, oscillator::OscNode};

/// Output level of the guitar synth before its bus.
pub const GUITAR_VOLUME_DB: f32 = -8.0;

pub fn guitar() -> impl GraphNode {
    OscNode::triangle().amplify(EnvNode::adsr(0.02, 0.3, 0.4, 1.4))
}
