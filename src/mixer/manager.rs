use std::sync::Arc;

use log::{debug, info, trace, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    catalog::{Catalog, InstrumentKey},
    config::MixConfig,
    dsp::buffer::sum_in_place,
    error::{ConfigError, GateError},
    graph::node::RenderCtx,
    mixer::{
        chain::{Ambient, InstrumentChain, MasterChain},
        gate::OutputGate,
        graph::AudioGraph,
    },
    selection::{randomized, InstrumentSelection, Volumes},
    transport::{Fired, Part, Transport},
    MAX_BLOCK_SIZE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    /// Nothing built (fresh, or disposed).
    Idle,
    Building,
    /// Built; the clock is not running.
    Stopped,
    Playing,
}

/// Owns the signal graph and the shared clock, and keeps both in step with
/// the selection list.
///
/// Every selection change goes through [`GraphManager::rebuild`], which
/// throws the whole graph away and builds it again from scratch. Volume
/// changes are the one exception: they glide the live bus gain instead.
pub struct GraphManager<G: OutputGate> {
    config: MixConfig,
    catalog: Arc<Catalog>,
    graph: AudioGraph,
    transport: Transport,
    volumes: Volumes,
    play_intent: bool,
    playing: bool,
    state: GraphState,
    gate: G,
    rng: StdRng,
    fired: Vec<Fired>,
    chain_buffer: Vec<f32>,
}

impl<G: OutputGate> GraphManager<G> {
    pub fn new(config: MixConfig, gate: G) -> Result<Self, ConfigError> {
        Self::with_catalog(config, Catalog::builtin(), gate)
    }

    pub fn with_catalog(config: MixConfig, catalog: Arc<Catalog>, gate: G) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            transport: Transport::new(config.bpm, config.ppq, config.sample_rate as f64),
            config,
            catalog,
            graph: AudioGraph::new(),
            volumes: Volumes::default(),
            play_intent: true,
            playing: false,
            state: GraphState::Idle,
            gate,
            rng,
            fired: Vec::with_capacity(64),
            chain_buffer: vec![0.0; MAX_BLOCK_SIZE],
        })
    }

    /// Replace the RNG used for randomized selections and noise seeds.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    fn set_state(&mut self, state: GraphState) {
        if self.state != state {
            debug!("graph state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn ensure_resumed(&mut self) -> Result<(), GateError> {
        if self.gate.is_resumed() {
            return Ok(());
        }
        self.gate.resume()
    }

    /// Tear the graph down and build it again for `selections`.
    ///
    /// `selections` is the full per-instrument list; disabled entries are
    /// skipped. If the output cannot be resumed the graph is left untouched.
    pub fn rebuild(&mut self, selections: &[InstrumentSelection]) {
        if let Err(err) = self.ensure_resumed() {
            warn!("audio output unavailable, keeping current graph: {err}");
            return;
        }

        self.set_state(GraphState::Building);

        self.transport.stop();
        self.transport.cancel();
        self.transport.set_loop(false);

        self.graph.dispose(true);
        let generation = self.graph.next_generation();

        let master = MasterChain::build(&mut self.graph, &self.config);
        let mix_bus = master.mix_bus_id();
        self.graph.master = Some(master);
        self.ensure_ambient();

        if !selections.iter().any(|s| s.enabled) {
            self.playing = false;
            self.play_intent = false;
            self.set_state(GraphState::Stopped);
            info!("rebuilt graph with no instruments");
            return;
        }

        let loop_end = self.config.loop_ticks();
        for selection in selections.iter().filter(|s| s.enabled) {
            let key = selection.instrument;
            let Some(sequence) = self.catalog.sequence(key, selection.sequence_index) else {
                debug!("no sequence {} for {key}, skipping", selection.sequence_index);
                continue;
            };

            let seed = self.rng.gen();
            let chain = InstrumentChain::build(key, &mut self.graph, mix_bus, &self.config, self.volumes.get(key), seed);
            let part = Part::new(key, generation, chain.bus_id(), sequence, self.config.ppq, loop_end);
            self.graph.chains.push(chain);
            self.transport.schedule(part);
        }

        if self.transport.parts().is_empty() {
            self.playing = false;
            self.set_state(GraphState::Stopped);
            info!("rebuilt graph: nothing resolvable to play");
            return;
        }

        self.transport.set_bpm(self.config.bpm);
        self.transport.set_loop(true);
        self.transport.set_loop_end(loop_end);
        self.transport.set_position(0);

        if self.play_intent {
            self.transport.start();
            self.playing = true;
            self.set_state(GraphState::Playing);
        } else {
            self.playing = false;
            self.set_state(GraphState::Stopped);
        }

        info!(
            "rebuilt graph: {} parts, {} live nodes, playing: {}",
            self.transport.parts().len(),
            self.graph.live_node_count(),
            self.playing
        );
    }

    fn ensure_ambient(&mut self) {
        if self.config.ambient_enabled && !self.graph.has_ambient() {
            let seed = self.rng.gen();
            let ambient = Ambient::build(&mut self.graph, &self.config, seed);
            self.graph.ambient = Some(ambient);
        }
    }

    /// Set an instrument's level from a 0–100 slider value.
    ///
    /// A live bus glides to the new gain; the graph itself is never rebuilt.
    pub fn change_volume(&mut self, key: InstrumentKey, value: f32) {
        let gain = if value.is_nan() { 0.0 } else { (value / 100.0).clamp(0.0, 1.0) };
        self.volumes.set(key, gain);

        if let Some(chain) = self.graph.chain_mut(key) {
            chain
                .bus_mut()
                .ramp_to(gain, self.config.volume_ramp_seconds, self.config.sample_rate);
        }
    }

    /// Stop the clock and rewind. Nodes stay as they are.
    pub fn stop_all(&mut self) {
        self.transport.stop();
        self.transport.set_position(0);
        self.play_intent = false;
        self.playing = false;
        if self.state != GraphState::Idle {
            self.set_state(GraphState::Stopped);
        }
    }

    /// Start playback from the top.
    ///
    /// With nothing enabled, returns a randomized selection list for the
    /// caller to apply (which rebuilds with play intent set).
    pub fn play_all(&mut self, selections: &[InstrumentSelection]) -> Option<Vec<InstrumentSelection>> {
        self.play_intent = true;

        if let Err(err) = self.ensure_resumed() {
            warn!("audio output unavailable, cannot play: {err}");
            return None;
        }

        if !selections.iter().any(|s| s.enabled) {
            return Some(randomized(&self.catalog, &mut self.rng));
        }

        if self.transport.parts().is_empty() {
            self.rebuild(selections);
        } else {
            self.transport.set_position(0);
            self.transport.start();
            self.playing = true;
            self.set_state(GraphState::Playing);
        }
        None
    }

    /// Full teardown, ambience included.
    pub fn dispose(&mut self) {
        self.transport.stop();
        self.transport.cancel();
        self.graph.dispose(false);
        self.graph.next_generation();
        self.playing = false;
        self.set_state(GraphState::Idle);
    }

    /// Render one mono block. Silence until the output has been resumed.
    pub fn render(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        if !self.gate.is_resumed() {
            return;
        }

        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_chunk(chunk);
        }
    }

    fn render_chunk(&mut self, out: &mut [f32]) {
        let mut fired = std::mem::take(&mut self.fired);
        fired.clear();
        self.transport.advance(out.len(), &mut fired);

        // Render up to each trigger, fire it, carry on.
        let mut start = 0;
        for hit in &fired {
            if hit.frame > start {
                self.render_span(&mut out[start..hit.frame]);
                start = hit.frame;
            }
            self.dispatch(*hit);
        }
        self.render_span(&mut out[start..]);

        self.fired = fired;
    }

    fn dispatch(&mut self, hit: Fired) {
        let Some(part) = self.transport.part(hit.part) else {
            return;
        };

        if part.generation != self.graph.generation() || !self.graph.is_live(part.target) {
            trace!("dropping stale {} event from generation {}", part.instrument, part.generation);
            return;
        }

        let bpm = self.transport.bpm();
        if let (Some(event), Some(chain)) = (part.event(hit.event), self.graph.chain_mut(part.instrument)) {
            chain.trigger(event, bpm);
        }
    }

    fn render_span(&mut self, out: &mut [f32]) {
        if out.is_empty() {
            return;
        }

        let ctx = RenderCtx::at_rate(self.config.sample_rate);
        let scratch = &mut self.chain_buffer[..out.len()];

        for chain in &mut self.graph.chains {
            chain.render(scratch, &ctx);
            sum_in_place(out, scratch);
        }

        if let Some(master) = self.graph.master.as_mut() {
            master.render(out, &ctx);
        }

        if let Some(ambient) = self.graph.ambient.as_mut() {
            ambient.render(scratch, &ctx);
            sum_in_place(out, scratch);
        }
    }

    pub fn graph(&self) -> &AudioGraph {
        &self.graph
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &MixConfig {
        &self.config
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play_intent(&self) -> bool {
        self.play_intent
    }

    /// Mark whether the next rebuild should start the clock.
    pub fn set_play_intent(&mut self, intent: bool) {
        self.play_intent = intent;
    }

    pub fn state(&self) -> GraphState {
        self.state
    }

    pub fn is_gate_resumed(&self) -> bool {
        self.gate.is_resumed()
    }

    /// Stored level for `key` in [0, 1].
    pub fn volume(&self, key: InstrumentKey) -> f32 {
        self.volumes.get(key)
    }

    /// Current gain of `key`'s live bus, mid-glide if a ramp is running.
    pub fn bus_gain(&self, key: InstrumentKey) -> Option<f32> {
        self.graph.chain(key).map(|chain| chain.bus().gain())
    }

    pub fn bus_id(&self, key: InstrumentKey) -> Option<crate::mixer::NodeId> {
        self.graph.chain(key).map(InstrumentChain::bus_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mixer::gate::ImmediateGate, sequencing::Position};

    fn manager() -> GraphManager<ImmediateGate> {
        let config = MixConfig::default().with_seed(5).with_ambient(false);
        GraphManager::new(config, ImmediateGate::new()).unwrap()
    }

    fn only(key: InstrumentKey) -> Vec<InstrumentSelection> {
        InstrumentKey::ALL
            .iter()
            .map(|&k| InstrumentSelection {
                instrument: k,
                sequence_index: 0,
                enabled: k == key,
            })
            .collect()
    }

    #[test]
    fn stale_parts_are_dropped() {
        let mut mgr = manager();
        mgr.rebuild(&only(InstrumentKey::Drums));

        // a part left over from an earlier build, pointing at a live bus
        let target = mgr.bus_id(InstrumentKey::Drums).unwrap();
        let sequence = crate::catalog::Sequence {
            name: "stale".into(),
            events: vec![crate::catalog::Event::drum(Position::ZERO, crate::catalog::DrumHit::Kick)],
        };
        mgr.transport.cancel();
        let stale = Part::new(InstrumentKey::Drums, mgr.graph.generation() - 1, target, &sequence, 480, 3840);
        mgr.transport.schedule(stale);
        mgr.transport.set_position(0);

        let mut block = vec![0.0; 256];
        mgr.render(&mut block);
        assert_eq!(mgr.graph.chain(InstrumentKey::Drums).unwrap().active_voice_count(), 0);
    }

    #[test]
    fn live_parts_trigger_voices() {
        let mut mgr = manager();
        mgr.rebuild(&only(InstrumentKey::Drums));

        let mut block = vec![0.0; 256];
        mgr.render(&mut block);
        assert!(mgr.graph.chain(InstrumentKey::Drums).unwrap().active_voice_count() > 0);
        assert!(block.iter().any(|s| s.abs() > 1e-4));
    }

    #[test]
    fn render_is_silent_before_resume() {
        let mut mgr = manager();
        let mut block = vec![1.0; 64];
        mgr.render(&mut block);
        assert!(block.iter().all(|s| *s == 0.0));
        assert_eq!(mgr.state(), GraphState::Idle);
    }

    #[test]
    fn oversized_blocks_are_chunked() {
        let mut mgr = manager();
        mgr.rebuild(&only(InstrumentKey::Bass));

        let mut block = vec![0.0; MAX_BLOCK_SIZE * 2 + 100];
        mgr.render(&mut block);
        assert_eq!(mgr.transport().position_ticks(), {
            let ticks_per_sample = 84.0 / 60.0 * 480.0 / 48_000.0;
            (block.len() as f64 * ticks_per_sample) as u64
        });
    }
}
