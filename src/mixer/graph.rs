use slotmap::SlotMap;

use crate::{
    catalog::{DrumHit, InstrumentKey},
    mixer::chain::{Ambient, InstrumentChain, MasterChain},
};

slotmap::new_key_type! {
    /// Handle to a node in the graph registry.
    ///
    /// Keys are generational: once a node is disposed its id never resolves
    /// again, even if the slot is reused by a later rebuild.
    pub struct NodeId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Voice(InstrumentKey),
    DrumVoice(DrumHit),
    Chorus,
    FeedbackDelay,
    HatFilter,
    InstrumentBus(InstrumentKey),
    MixBus,
    Reverb,
    Compressor,
    Master,
    WindSource,
    WindFilter,
    WindGain,
}

impl NodeKind {
    pub fn is_voice(&self) -> bool {
        matches!(self, NodeKind::Voice(_) | NodeKind::DrumVoice(_))
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self, NodeKind::WindSource | NodeKind::WindFilter | NodeKind::WindGain)
    }
}

/// Where a node's output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Node(NodeId),
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInfo {
    pub kind: NodeKind,
    pub output: Destination,
}

/// Every live node, keyed by role.
///
/// The registry mirrors the chains: each DSP stage a chain owns has exactly
/// one entry here, registered when the chain is built and removed when it
/// is disposed. The registry is what liveness checks and inspection run
/// against; the chains are what renders.
pub struct AudioGraph {
    nodes: SlotMap<NodeId, NodeInfo>,
    generation: u64,
    pub(crate) master: Option<MasterChain>,
    pub(crate) chains: Vec<InstrumentChain>,
    pub(crate) ambient: Option<Ambient>,
}

impl Default for AudioGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioGraph {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            generation: 0,
            master: None,
            chains: Vec::new(),
            ambient: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidate everything scheduled against the previous build.
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub(crate) fn register(&mut self, kind: NodeKind, output: Destination) -> NodeId {
        self.nodes.insert(NodeInfo { kind, output })
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeInfo> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeInfo)> {
        self.nodes.iter()
    }

    pub fn live_node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn voice_node_count(&self) -> usize {
        self.count(NodeKind::is_voice)
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.count(|k| *k == kind)
    }

    fn count(&self, pred: impl Fn(&NodeKind) -> bool) -> usize {
        self.nodes.values().filter(|info| pred(&info.kind)).count()
    }

    /// Ids of every per-instrument gain bus.
    pub fn buses(&self) -> Vec<NodeId> {
        self.chains.iter().map(InstrumentChain::bus_id).collect()
    }

    pub fn bus_count(&self) -> usize {
        self.count(|k| matches!(k, NodeKind::InstrumentBus(_)))
    }

    pub fn mix_bus(&self) -> Option<NodeId> {
        self.master.as_ref().map(MasterChain::mix_bus_id)
    }

    pub fn is_routed_to_mix(&self, id: NodeId) -> bool {
        match (self.node(id), self.mix_bus()) {
            (Some(info), Some(mix)) => info.output == Destination::Node(mix),
            _ => false,
        }
    }

    /// Instruments that currently have a chain, in build order.
    pub fn instruments(&self) -> Vec<InstrumentKey> {
        self.chains.iter().map(InstrumentChain::key).collect()
    }

    pub fn chain(&self, key: InstrumentKey) -> Option<&InstrumentChain> {
        self.chains.iter().find(|chain| chain.key() == key)
    }

    pub(crate) fn chain_mut(&mut self, key: InstrumentKey) -> Option<&mut InstrumentChain> {
        self.chains.iter_mut().find(|chain| chain.key() == key)
    }

    pub fn has_master(&self) -> bool {
        self.master.is_some()
    }

    pub fn has_ambient(&self) -> bool {
        self.ambient.is_some()
    }

    /// Drop every chain and its registry entries.
    ///
    /// Idempotent. With `keep_ambient` the wind bed survives so it keeps
    /// playing through rebuilds.
    pub(crate) fn dispose(&mut self, keep_ambient: bool) {
        self.chains.clear();
        self.master = None;
        if !keep_ambient {
            self.ambient = None;
        }
        self.nodes
            .retain(|_, info| keep_ambient && info.kind.is_ambient());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposed_ids_stay_dead() {
        let mut graph = AudioGraph::new();
        let bus = graph.register(NodeKind::InstrumentBus(InstrumentKey::Bass), Destination::Output);
        let wind = graph.register(NodeKind::WindGain, Destination::Output);
        assert!(graph.is_live(bus));

        graph.dispose(true);
        assert!(!graph.is_live(bus));
        assert!(graph.is_live(wind));

        // a slot reused by a new node must not revive the old key
        let again = graph.register(NodeKind::InstrumentBus(InstrumentKey::Bass), Destination::Output);
        assert!(graph.is_live(again));
        assert!(!graph.is_live(bus));

        graph.dispose(false);
        graph.dispose(false);
        assert_eq!(graph.live_node_count(), 0);
    }

    #[test]
    fn generation_only_moves_forward() {
        let mut graph = AudioGraph::new();
        assert_eq!(graph.generation(), 0);
        assert_eq!(graph.next_generation(), 1);
        assert_eq!(graph.next_generation(), 2);
    }
}
