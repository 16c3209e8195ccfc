use crate::{
    dsp::{
        buffer::{apply_gain, sum_in_place},
        compressor::db_to_gain,
    },
    graph::node::{GraphNode, RenderCtx},
    synth::{factory::VoiceFactory, voice::{Voice, VoiceState}},
    MAX_BLOCK_SIZE,
};

/// A bank of identical voices with oldest-first stealing.
///
/// With one voice this is a mono synth: a new note always takes over the
/// single voice, which is how the bass plays.
pub struct PolySynth<V: GraphNode> {
    voices: Vec<Voice<V>>,
    sample_rate: f32,
    output_gain: f32,
    temp_buffer: Vec<f32>,
    frame_counter: u64,
}

impl<V: GraphNode> PolySynth<V> {
    pub fn new<F>(factory: &F, polyphony: usize, sample_rate: f32) -> Self
    where
        F: VoiceFactory<Voice = V>,
    {
        let voices = (0..polyphony.max(1))
            .map(|_| Voice::new(factory.create_voice(), sample_rate))
            .collect();

        Self {
            voices,
            sample_rate,
            output_gain: 1.0,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
        }
    }

    pub fn mono<F>(factory: &F, sample_rate: f32) -> Self
    where
        F: VoiceFactory<Voice = V>,
    {
        Self::new(factory, 1, sample_rate)
    }

    /// Output level in dB (0 = unity).
    pub fn with_volume_db(mut self, db: f32) -> Self {
        self.output_gain = db_to_gain(db);
        self
    }

    /// Start each note now and release it after `duration_seconds`.
    pub fn trigger_attack_release(&mut self, notes: &[u8], duration_seconds: f64, velocity: f32) {
        let hold = (duration_seconds.max(0.0) * self.sample_rate as f64).round() as u64;
        for &note in notes {
            let age = self.frame_counter;
            let voice = self.allocate_voice();
            voice.start(note, velocity, age, Some(hold));
        }
    }

    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn polyphony(&self) -> usize {
        self.voices.len()
    }

    fn allocate_voice(&mut self) -> &mut Voice<V> {
        let idx = self
            .voices
            .iter()
            .position(|v| v.is_free())
            .or_else(|| self.oldest(VoiceState::Releasing))
            .or_else(|| self.oldest(VoiceState::Active))
            .unwrap_or(0);

        &mut self.voices[idx]
    }

    fn oldest(&self, state: VoiceState) -> Option<usize> {
        self.voices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.state() == state)
            .min_by_key(|(_, v)| v.age())
            .map(|(idx, _)| idx)
    }
}

impl<V: GraphNode> GraphNode for PolySynth<V> {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        out.fill(0.0);
        for voice in &mut self.voices {
            if voice.is_active() {
                let scratch = &mut self.temp_buffer[..out.len()];
                voice.render(scratch);
                sum_in_place(out, scratch);
            }
        }
        apply_gain(out, self.output_gain);

        self.frame_counter += out.len() as u64;
    }

    fn is_active(&self) -> bool {
        self.voices.iter().any(Voice::is_active)
    }
}
