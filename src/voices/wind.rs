//! Ambient wind bed.
//!
//! Brown noise through a 400 Hz low-pass: a dark, continuous rumble. It has
//! no envelope and never stops; the mixer keeps it at a very low level on
//! its own gain, outside the master chain, and leaves it running across
//! rebuilds.

use crate::graph::{extensions::NodeExt, filter::FilterNode, node::GraphNode, oscillator::NoiseNode};

pub const WIND_CUTOFF_HZ: f32 = 400.0;

pub fn wind(seed: u64) -> impl GraphNode {
    NoiseNode::brown(seed).through(FilterNode::lowpass(WIND_CUTOFF_HZ))
}
