//! What one UI frame draws, copied out of the session under the lock.
//!
//! Taking a snapshot keeps the lock short: the audio callback never waits
//! on terminal drawing.

use facade_mix::{
    catalog::InstrumentKey,
    mixer::OutputGate,
    sequencing::Position,
    session::FacadeSession,
};

pub struct RowInfo {
    pub key: InstrumentKey,
    pub name: String,
    pub sequences: Vec<String>,
    pub enabled: bool,
    pub selected: usize,
    pub volume: u8,
}

pub struct Snapshot {
    pub rows: Vec<RowInfo>,
    pub label: String,
    pub is_playing: bool,
    pub bpm: f64,
    pub position: Position,
    pub loop_bars: u32,
    pub live_nodes: usize,
}

impl Snapshot {
    pub fn capture<G: OutputGate>(session: &FacadeSession<G>) -> Self {
        let manager = session.manager();
        let rows = manager
            .catalog()
            .instruments()
            .iter()
            .map(|def| {
                let selection = session.selections().get(def.key);
                RowInfo {
                    key: def.key,
                    name: def.display_name.clone(),
                    sequences: def.sequences.iter().map(|s| s.name.clone()).collect(),
                    enabled: selection.is_some_and(|s| s.enabled),
                    selected: selection.map_or(0, |s| s.sequence_index),
                    volume: session.volume_slider(def.key),
                }
            })
            .collect();

        Self {
            rows,
            label: session.label(),
            is_playing: session.is_playing(),
            bpm: manager.transport().bpm(),
            position: manager.transport().position(),
            loop_bars: manager.config().loop_bars,
            live_nodes: manager.graph().live_node_count(),
        }
    }

    pub fn columns(&self) -> usize {
        self.rows.iter().map(|r| r.sequences.len()).max().unwrap_or(0)
    }
}
