/*
Pitch
=====

Notes are MIDI numbers throughout: C4 (middle C) = 60, A4 = 69 = 440 Hz.

  midi = 12 * (octave + 1) + pitch class

The catalog writes notes with `note(PitchClass::E, 2)`; the front end turns
them back into names for display.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchClass {
    C = 0,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

const NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

pub const fn note(class: PitchClass, octave: i8) -> u8 {
    ((octave as i16 + 1) * 12 + class as i16) as u8
}

#[inline]
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// `"C#3"`-style name.
pub fn note_name(note: u8) -> String {
    let octave = note as i16 / 12 - 1;
    format!("{}{}", NAMES[note as usize % 12], octave)
}

/// Parses `C1`, `F#3`, `Bb2`. Returns `None` for anything else.
pub fn parse_note(name: &str) -> Option<u8> {
    let mut chars = name.chars();
    let base: i16 = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest = chars.as_str();
    let (shift, octave) = match rest.as_bytes().first()? {
        b'#' => (1, &rest[1..]),
        b'b' => (-1, &rest[1..]),
        _ => (0, rest),
    };

    let octave: i16 = octave.parse().ok()?;
    let midi = (octave + 1) * 12 + base + shift;
    u8::try_from(midi).ok().filter(|m| *m <= 127)
}
