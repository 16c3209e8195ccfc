use crate::{
    catalog::{DrumHit, Event, EventKind, InstrumentKey},
    config::MixConfig,
    dsp::buffer::sum_in_place,
    graph::{
        chorus::ChorusNode,
        compressor::CompressorNode,
        delay::FeedbackDelayNode,
        extensions::NodeExt,
        filter::FilterNode,
        gain::GainNode,
        node::{GraphNode, RenderCtx},
        reverb::ReverbNode,
    },
    mixer::graph::{AudioGraph, Destination, NodeId, NodeKind},
    sequencing::{note, Duration, PitchClass},
    synth::poly::PolySynth,
    voices, MAX_BLOCK_SIZE,
};

/*
Signal chains
=============

One chain per enabled instrument, one master chain, one ambient bed:

  guitar:  poly triangle ──→ chorus ──→ bus ─┐
  synth:   poly saw ──→ feedback delay ──→ bus ─┤
  bass:    mono square (LP + filter env) ──→ bus ─┼──→ mix bus ──→ reverb ──→ compressor ──→ master ──→ out
  drums:   kick ─────────────┐                   │
           snare ────────────┼──→ bus ───────────┘
           hat ──→ HP 8 kHz ─┘

  wind ──→ LP 400 Hz ──→ gain ──────────────────────────────────────────────────────────────────→ out

Each stage that owns DSP state gets one registry entry in `AudioGraph` when
the chain is built. Buses are built first so every entry can point at its
destination.
*/

const GUITAR_CHORUS_RATE: f32 = 1.8;
const GUITAR_CHORUS_DELAY_MS: f32 = 1.4;
const GUITAR_CHORUS_DEPTH: f32 = 0.35;
const SYNTH_DELAY_FEEDBACK: f32 = 0.28;

const KICK_NOTE: u8 = note(PitchClass::C, 1);
// Snare and hat are unpitched; the note only selects a voice context.
const UNPITCHED_NOTE: u8 = note(PitchClass::C, 4);

type Synth = PolySynth<Box<dyn GraphNode>>;

/// Velocity used when an event does not carry its own.
pub fn default_velocity(key: InstrumentKey) -> f32 {
    match key {
        InstrumentKey::Guitar => 0.65,
        InstrumentKey::Synth => 0.45,
        InstrumentKey::Bass => 0.8,
        InstrumentKey::Drums => 0.85,
    }
}

pub struct DrumKit {
    kick: Synth,
    snare: Synth,
    hat: Synth,
    hat_filter: FilterNode,
    scratch: Vec<f32>,
}

impl DrumKit {
    fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let scratch = &mut self.scratch[..out.len()];

        self.kick.render_block(out, ctx);

        self.snare.render_block(scratch, ctx);
        sum_in_place(out, scratch);

        self.hat.render_block(scratch, ctx);
        self.hat_filter.render_block(scratch, ctx);
        sum_in_place(out, scratch);
    }

    fn active_voice_count(&self) -> usize {
        self.kick.active_voice_count() + self.snare.active_voice_count() + self.hat.active_voice_count()
    }
}

pub enum ChainSource {
    Melodic {
        synth: Synth,
        effect: Option<Box<dyn GraphNode>>,
    },
    Drums(DrumKit),
}

/// One instrument's voices, effect and gain bus.
pub struct InstrumentChain {
    key: InstrumentKey,
    source: ChainSource,
    bus: GainNode,
    bus_id: NodeId,
    node_ids: Vec<NodeId>,
}

impl InstrumentChain {
    /// Build the chain for `key` and register its nodes, routing the bus
    /// into `mix_bus`.
    pub(crate) fn build(
        key: InstrumentKey,
        graph: &mut AudioGraph,
        mix_bus: NodeId,
        config: &MixConfig,
        volume: f32,
        seed: u64,
    ) -> Self {
        let sr = config.sample_rate;
        let bus_id = graph.register(NodeKind::InstrumentBus(key), Destination::Node(mix_bus));
        let to_bus = Destination::Node(bus_id);
        let mut node_ids = vec![bus_id];

        let source = match key {
            InstrumentKey::Guitar => {
                let effect_id = graph.register(NodeKind::Chorus, to_bus);
                node_ids.push(effect_id);
                node_ids.push(graph.register(NodeKind::Voice(key), Destination::Node(effect_id)));

                let synth = PolySynth::new(&|| voices::guitar().boxed(), config.polyphony, sr)
                    .with_volume_db(voices::GUITAR_VOLUME_DB);
                let chorus = ChorusNode::new(GUITAR_CHORUS_RATE, GUITAR_CHORUS_DELAY_MS, GUITAR_CHORUS_DEPTH);
                ChainSource::Melodic {
                    synth,
                    effect: Some(chorus.boxed()),
                }
            }
            InstrumentKey::Synth => {
                let effect_id = graph.register(NodeKind::FeedbackDelay, to_bus);
                node_ids.push(effect_id);
                node_ids.push(graph.register(NodeKind::Voice(key), Destination::Node(effect_id)));

                let synth = PolySynth::new(&|| voices::pad().boxed(), config.polyphony, sr)
                    .with_volume_db(voices::PAD_VOLUME_DB);
                let delay_time = Duration::EIGHTH.to_seconds(config.bpm) as f32;
                let delay = FeedbackDelayNode::new(delay_time, SYNTH_DELAY_FEEDBACK);
                ChainSource::Melodic {
                    synth,
                    effect: Some(delay.boxed()),
                }
            }
            InstrumentKey::Bass => {
                node_ids.push(graph.register(NodeKind::Voice(key), to_bus));

                let synth = PolySynth::mono(&|| voices::bass().boxed(), sr).with_volume_db(voices::BASS_VOLUME_DB);
                ChainSource::Melodic { synth, effect: None }
            }
            InstrumentKey::Drums => {
                let filter_id = graph.register(NodeKind::HatFilter, to_bus);
                node_ids.push(filter_id);
                node_ids.push(graph.register(NodeKind::DrumVoice(DrumHit::Kick), to_bus));
                node_ids.push(graph.register(NodeKind::DrumVoice(DrumHit::Snare), to_bus));
                node_ids.push(graph.register(NodeKind::DrumVoice(DrumHit::Hat), Destination::Node(filter_id)));

                ChainSource::Drums(DrumKit {
                    kick: PolySynth::mono(&|| voices::kick().boxed(), sr),
                    snare: PolySynth::mono(&move || voices::snare(seed).boxed(), sr),
                    hat: PolySynth::mono(&|| voices::hat().boxed(), sr).with_volume_db(voices::HAT_VOLUME_DB),
                    hat_filter: FilterNode::highpass(voices::HAT_FILTER_HZ),
                    scratch: vec![0.0; MAX_BLOCK_SIZE],
                })
            }
        };

        Self {
            key,
            source,
            bus: GainNode::new(volume),
            bus_id,
            node_ids,
        }
    }

    pub fn key(&self) -> InstrumentKey {
        self.key
    }

    /// Scheduled parts point here.
    pub fn bus_id(&self) -> NodeId {
        self.bus_id
    }

    /// Every registry entry this chain owns, bus first.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    pub fn bus(&self) -> &GainNode {
        &self.bus
    }

    pub(crate) fn bus_mut(&mut self) -> &mut GainNode {
        &mut self.bus
    }

    pub fn active_voice_count(&self) -> usize {
        match &self.source {
            ChainSource::Melodic { synth, .. } => synth.active_voice_count(),
            ChainSource::Drums(kit) => kit.active_voice_count(),
        }
    }

    /// Play one event from this instrument's part.
    pub(crate) fn trigger(&mut self, event: &Event, bpm: f64) {
        let velocity = event.velocity.unwrap_or_else(|| default_velocity(self.key));

        match (&mut self.source, &event.kind) {
            (ChainSource::Melodic { synth, .. }, EventKind::Melodic { notes }) => {
                let seconds = event.duration.unwrap_or(Duration::EIGHTH).to_seconds(bpm);
                // the bass is monophonic and plays chord roots only
                let notes = if self.key == InstrumentKey::Bass {
                    &notes[..notes.len().min(1)]
                } else {
                    &notes[..]
                };
                synth.trigger_attack_release(notes, seconds, velocity);
            }
            (ChainSource::Drums(kit), EventKind::Drum { hit }) => {
                let (synth, note, length) = match hit {
                    DrumHit::Kick => (&mut kit.kick, KICK_NOTE, event.duration.unwrap_or(Duration::EIGHTH)),
                    DrumHit::Snare => (&mut kit.snare, UNPITCHED_NOTE, event.duration.unwrap_or(Duration::EIGHTH)),
                    DrumHit::Hat => (&mut kit.hat, UNPITCHED_NOTE, Duration::SIXTEENTH),
                };
                synth.trigger_attack_release(&[note], length.to_seconds(bpm), velocity);
            }
            _ => log::debug!("{}: ignoring event of the wrong kind", self.key),
        }
    }

    /// Voices, effect, then bus gain. Overwrites `out`.
    pub(crate) fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        match &mut self.source {
            ChainSource::Melodic { synth, effect } => {
                synth.render_block(out, ctx);
                if let Some(effect) = effect {
                    effect.render_block(out, ctx);
                }
            }
            ChainSource::Drums(kit) => kit.render(out, ctx),
        }
        self.bus.render_block(out, ctx);
    }
}

/// Mix bus → reverb → compressor → master gain.
pub struct MasterChain {
    mix_bus: GainNode,
    reverb: ReverbNode,
    compressor: CompressorNode,
    master: GainNode,
    mix_bus_id: NodeId,
}

impl MasterChain {
    pub(crate) fn build(graph: &mut AudioGraph, config: &MixConfig) -> Self {
        let master_id = graph.register(NodeKind::Master, Destination::Output);
        let compressor_id = graph.register(NodeKind::Compressor, Destination::Node(master_id));
        let reverb_id = graph.register(NodeKind::Reverb, Destination::Node(compressor_id));
        let mix_bus_id = graph.register(NodeKind::MixBus, Destination::Node(reverb_id));

        Self {
            mix_bus: GainNode::new(1.0),
            reverb: ReverbNode::new(config.reverb_decay, config.reverb_wet),
            compressor: CompressorNode::new(
                config.compressor_threshold_db,
                config.compressor_ratio,
                config.compressor_attack,
                config.compressor_release,
            ),
            master: GainNode::new(config.master_gain),
            mix_bus_id,
        }
    }

    pub fn mix_bus_id(&self) -> NodeId {
        self.mix_bus_id
    }

    pub fn master_gain(&self) -> f32 {
        self.master.gain()
    }

    pub(crate) fn render(&mut self, buf: &mut [f32], ctx: &RenderCtx) {
        self.mix_bus.render_block(buf, ctx);
        self.reverb.render_block(buf, ctx);
        self.compressor.render_block(buf, ctx);
        self.master.render_block(buf, ctx);
    }
}

/// Wind bed, routed straight to the output.
pub struct Ambient {
    source: Box<dyn GraphNode>,
    gain: GainNode,
}

impl Ambient {
    pub(crate) fn build(graph: &mut AudioGraph, config: &MixConfig, seed: u64) -> Self {
        let gain_id = graph.register(NodeKind::WindGain, Destination::Output);
        let filter_id = graph.register(NodeKind::WindFilter, Destination::Node(gain_id));
        graph.register(NodeKind::WindSource, Destination::Node(filter_id));

        Self {
            source: voices::wind(seed).boxed(),
            gain: GainNode::new(config.ambient_gain),
        }
    }

    pub fn gain(&self) -> f32 {
        self.gain.gain()
    }

    /// Overwrites `out`.
    pub(crate) fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.gain.render_block(out, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::Position;

    fn build(key: InstrumentKey) -> (AudioGraph, InstrumentChain) {
        let config = MixConfig::default();
        let mut graph = AudioGraph::new();
        let master = MasterChain::build(&mut graph, &config);
        let mix_bus = master.mix_bus_id();
        graph.master = Some(master);
        let chain = InstrumentChain::build(key, &mut graph, mix_bus, &config, 0.8, 3);
        (graph, chain)
    }

    #[test]
    fn guitar_chain_routes_voice_through_chorus() {
        let (graph, chain) = build(InstrumentKey::Guitar);
        assert_eq!(graph.count_kind(NodeKind::Chorus), 1);
        assert_eq!(graph.count_kind(NodeKind::Voice(InstrumentKey::Guitar)), 1);
        assert!(graph.is_routed_to_mix(chain.bus_id()));
        assert_eq!(chain.node_ids().len(), 3);
    }

    #[test]
    fn drum_kit_registers_every_hit() {
        let (graph, chain) = build(InstrumentKey::Drums);
        assert_eq!(graph.voice_node_count(), 3);
        assert_eq!(graph.count_kind(NodeKind::HatFilter), 1);
        assert_eq!(chain.node_ids().len(), 5);
    }

    #[test]
    fn bass_plays_only_the_root() {
        let (_, mut chain) = build(InstrumentKey::Bass);
        let chord = Event::melodic(Position::ZERO, &[28, 35, 40], Duration::QUARTER);
        chain.trigger(&chord, 84.0);
        assert_eq!(chain.active_voice_count(), 1);
    }

    #[test]
    fn guitar_plays_whole_chords() {
        let (_, mut chain) = build(InstrumentKey::Guitar);
        let chord = Event::melodic(Position::ZERO, &[52, 55, 59], Duration::QUARTER);
        chain.trigger(&chord, 84.0);
        assert_eq!(chain.active_voice_count(), 3);
    }

    #[test]
    fn drum_hits_reach_the_bus() {
        let ctx = RenderCtx::at_rate(48_000.0);
        let (_, mut chain) = build(InstrumentKey::Drums);
        chain.trigger(&Event::drum(Position::ZERO, DrumHit::Kick), 84.0);
        chain.trigger(&Event::drum(Position::ZERO, DrumHit::Hat), 84.0);

        let mut block = vec![0.0; 512];
        chain.render(&mut block, &ctx);
        assert!(block.iter().any(|s| s.abs() > 1e-3));
        assert_eq!(chain.active_voice_count(), 2);
    }

    #[test]
    fn mismatched_event_is_ignored() {
        let (_, mut chain) = build(InstrumentKey::Guitar);
        chain.trigger(&Event::drum(Position::ZERO, DrumHit::Snare), 84.0);
        assert_eq!(chain.active_voice_count(), 0);
    }
}
