//! Transport - the one clock every part plays against
//!
//! Runs inside `GraphManager::render` and turns tick-based part timing into
//! sample-accurate trigger points. It does not touch any synth itself: each
//! block it reports which events fall where, and the manager dispatches them.

use crate::{
    catalog::{Event, InstrumentKey, Sequence},
    mixer::NodeId,
    sequencing::Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Stopped,
    Started,
}

/// An event scheduled at an absolute tick inside its part's loop.
#[derive(Debug, Clone)]
pub struct PartEvent {
    pub tick: u64,
    pub event: Event,
}

/// A looping sequence bound to the instrument chain that plays it.
///
/// `generation` and `target` let the dispatcher drop events whose graph has
/// since been torn down.
#[derive(Debug, Clone)]
pub struct Part {
    pub instrument: InstrumentKey,
    pub generation: u64,
    pub target: NodeId,
    pub looping: bool,
    pub loop_end: u64,
    events: Vec<PartEvent>,
    cursor: usize,
    last_local: u64,
}

impl Part {
    pub fn new(
        instrument: InstrumentKey,
        generation: u64,
        target: NodeId,
        sequence: &Sequence,
        ppq: u32,
        loop_end: u64,
    ) -> Self {
        let mut events: Vec<PartEvent> = sequence
            .events
            .iter()
            .map(|event| PartEvent {
                tick: event.time.to_ticks(ppq),
                event: event.clone(),
            })
            .collect();
        events.sort_by_key(|e| e.tick);

        Self {
            instrument,
            generation,
            target,
            looping: true,
            loop_end,
            events,
            cursor: 0,
            last_local: 0,
        }
    }

    pub fn events(&self) -> &[PartEvent] {
        &self.events
    }

    pub fn event(&self, index: usize) -> Option<&Event> {
        self.events.get(index).map(|e| &e.event)
    }

    fn rewind(&mut self) {
        self.cursor = 0;
        self.last_local = 0;
    }

    fn local_tick(&self, tick: u64) -> u64 {
        if self.looping && self.loop_end > 0 {
            tick % self.loop_end
        } else {
            tick
        }
    }
}

/// A trigger that landed in the block just advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    /// Sample offset inside the block.
    pub frame: usize,
    pub part: usize,
    pub event: usize,
}

pub struct Transport {
    bpm: f64,
    ppq: u32,
    sample_rate: f64,
    /// Fractional so tempo never drifts against the sample clock.
    tick_position: f64,
    samples_per_tick: f64,
    state: TransportState,
    looping: bool,
    loop_end: u64,
    parts: Vec<Part>,
}

impl Transport {
    pub fn new(bpm: f64, ppq: u32, sample_rate: f64) -> Self {
        Self {
            bpm,
            ppq,
            sample_rate,
            tick_position: 0.0,
            samples_per_tick: Self::compute_samples_per_tick(bpm, ppq, sample_rate),
            state: TransportState::Stopped,
            looping: false,
            loop_end: 0,
            parts: Vec::new(),
        }
    }

    fn compute_samples_per_tick(bpm: f64, ppq: u32, sample_rate: f64) -> f64 {
        // ticks per second = (bpm / 60) * ppq
        let ticks_per_second = (bpm / 60.0) * ppq as f64;
        sample_rate / ticks_per_second
    }

    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = bpm;
        self.samples_per_tick = Self::compute_samples_per_tick(bpm, self.ppq, self.sample_rate);
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn ppq(&self) -> u32 {
        self.ppq
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_loop_end(&mut self, ticks: u64) {
        self.loop_end = ticks;
    }

    pub fn loop_end(&self) -> u64 {
        self.loop_end
    }

    pub fn start(&mut self) {
        self.state = TransportState::Started;
    }

    pub fn stop(&mut self) {
        self.state = TransportState::Stopped;
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == TransportState::Started
    }

    /// Jump to `ticks`; every part starts over from there.
    pub fn set_position(&mut self, ticks: u64) {
        self.tick_position = ticks as f64;
        for part in &mut self.parts {
            part.rewind();
            part.last_local = part.local_tick(ticks);
            part.cursor = part.events.partition_point(|e| e.tick < part.last_local);
        }
    }

    pub fn position_ticks(&self) -> u64 {
        self.tick_position as u64
    }

    pub fn position(&self) -> Position {
        Position::from_ticks(self.position_ticks(), self.ppq)
    }

    /// Drop every scheduled part.
    pub fn cancel(&mut self) {
        self.parts.clear();
    }

    /// Add a part; returns its index for `Fired::part`.
    pub fn schedule(&mut self, mut part: Part) -> usize {
        part.last_local = part.local_tick(self.position_ticks());
        part.cursor = part.events.partition_point(|e| e.tick < part.last_local);
        self.parts.push(part);
        self.parts.len() - 1
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn part(&self, index: usize) -> Option<&Part> {
        self.parts.get(index)
    }

    /// Move the clock `frames` samples forward, appending every event that
    /// starts inside the block to `fired` in frame order.
    pub fn advance(&mut self, frames: usize, fired: &mut Vec<Fired>) {
        if self.state == TransportState::Stopped {
            return;
        }

        for frame in 0..frames {
            let current_tick = self.tick_position as u64;

            for (part_idx, part) in self.parts.iter_mut().enumerate() {
                let local = part.local_tick(current_tick);
                if local < part.last_local {
                    part.cursor = 0;
                }
                part.last_local = local;

                while part.cursor < part.events.len() && part.events[part.cursor].tick <= local {
                    fired.push(Fired {
                        frame,
                        part: part_idx,
                        event: part.cursor,
                    });
                    part.cursor += 1;
                }
            }

            self.tick_position += 1.0 / self.samples_per_tick;

            if self.looping && self.loop_end > 0 && self.tick_position >= self.loop_end as f64 {
                self.tick_position -= self.loop_end as f64;
                self.parts.iter_mut().for_each(Part::rewind);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DrumHit, Event};
    use crate::mixer::NodeId;

    const SR: f64 = 48_000.0;

    fn sequence(times: &[Position]) -> Sequence {
        Sequence {
            name: "test".into(),
            events: times.iter().map(|&t| Event::drum(t, DrumHit::Kick)).collect(),
        }
    }

    fn looping_transport(parts: &[&[Position]]) -> Transport {
        let mut transport = Transport::new(120.0, 480, SR);
        transport.set_loop(true);
        transport.set_loop_end(1920); // one bar
        for times in parts {
            let part = Part::new(InstrumentKey::Drums, 1, NodeId::default(), &sequence(times), 480, 1920);
            transport.schedule(part);
        }
        transport
    }

    #[test]
    fn stopped_transport_fires_nothing() {
        let mut transport = looping_transport(&[&[Position::ZERO]]);
        let mut fired = Vec::new();
        transport.advance(512, &mut fired);
        assert!(fired.is_empty());
        assert_eq!(transport.position_ticks(), 0);
    }

    #[test]
    fn events_land_on_exact_frames() {
        // 120 bpm: a beat is 24_000 samples
        let mut transport = looping_transport(&[&[Position::ZERO, Position::new(0, 1, 0)]]);
        transport.start();

        let mut fired = Vec::new();
        transport.advance(24_010, &mut fired);

        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].frame, 0);
        assert!((23_999..=24_001).contains(&fired[1].frame), "{}", fired[1].frame);
    }

    #[test]
    fn loop_wraps_and_refires() {
        let mut transport = looping_transport(&[&[Position::ZERO]]);
        transport.start();

        let mut fired = Vec::new();
        // a bar is 96_000 samples; run just over two
        for _ in 0..95 {
            transport.advance(2048, &mut fired);
        }
        assert_eq!(fired.len(), 3);
        assert!(transport.position_ticks() < 1920);
    }

    #[test]
    fn parts_share_one_clock() {
        let mut transport = looping_transport(&[&[Position::new(0, 2, 0)], &[Position::new(0, 2, 0)]]);
        transport.start();

        let mut fired = Vec::new();
        transport.advance(50_000, &mut fired);
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].frame, fired[1].frame);
        assert_ne!(fired[0].part, fired[1].part);
    }

    #[test]
    fn set_position_rewinds_parts() {
        let mut transport = looping_transport(&[&[Position::ZERO]]);
        transport.start();

        let mut fired = Vec::new();
        transport.advance(1024, &mut fired);
        assert_eq!(fired.len(), 1);

        transport.set_position(0);
        fired.clear();
        transport.advance(16, &mut fired);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].frame, 0);
    }

    #[test]
    fn cancel_drops_parts() {
        let mut transport = looping_transport(&[&[Position::ZERO]]);
        transport.cancel();
        transport.start();

        let mut fired = Vec::new();
        transport.advance(1024, &mut fired);
        assert!(fired.is_empty());
        assert!(transport.parts().is_empty());
    }
}
