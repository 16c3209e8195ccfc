//! The audio graph manager and everything it owns.
//!
//! `GraphManager` reacts to the full selection list by tearing the graph
//! down and rebuilding it; `AudioGraph` is the owned node set and registry
//! it builds into; `chain` holds the per-instrument, master and ambient
//! signal chains; `gate` abstracts the output that must be resumed before
//! anything is audible.

pub mod chain;
pub mod gate;
pub mod graph;
pub mod manager;

pub use gate::{ImmediateGate, OutputGate};
pub use graph::{AudioGraph, Destination, NodeId, NodeInfo, NodeKind};
pub use manager::{GraphManager, GraphState};
