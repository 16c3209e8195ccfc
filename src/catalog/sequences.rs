use super::{DrumHit, Event, InstrumentDefinition, InstrumentKey, Sequence};
use crate::sequencing::{
    note,
    Duration,
    PitchClass::{self, *},
    Position,
};

// Everything is in E minor, two bars of 4/4.

const fn n(class: PitchClass, octave: i8) -> u8 {
    note(class, octave)
}

fn at(bar: u32, beat: u32, sixteenth: u32) -> Position {
    Position::new(bar, beat, sixteenth)
}

/// Position of the `i`th eighth note of the loop.
fn eighth(i: u32) -> Position {
    at(i / 8, (i % 8) / 2, (i % 2) * 2)
}

fn sequence(name: &str, events: Vec<Event>) -> Sequence {
    Sequence {
        name: name.to_string(),
        events,
    }
}

fn definition(key: InstrumentKey, display_name: &str, sequences: Vec<Sequence>) -> InstrumentDefinition {
    InstrumentDefinition {
        key,
        display_name: display_name.to_string(),
        sequences,
    }
}

pub(super) fn instruments() -> Vec<InstrumentDefinition> {
    vec![guitar(), synth(), bass(), drums()]
}

fn guitar() -> InstrumentDefinition {
    let em = [n(E, 3), n(G, 3), n(B, 3)];
    let cmaj7 = [n(C, 3), n(E, 3), n(G, 3), n(B, 3)];
    let g = [n(G, 3), n(B, 3), n(D, 4)];
    let d = [n(D, 3), n(Fs, 3), n(A, 3)];
    let am = [n(A, 3), n(C, 4), n(E, 4)];
    let b = [n(B, 3), n(Ds, 4), n(Fs, 4)];

    let driftwood = sequence(
        "Driftwood",
        vec![
            Event::melodic(at(0, 0, 0), &em, Duration::HALF),
            Event::melodic(at(0, 2, 0), &cmaj7, Duration::HALF),
            Event::melodic(at(1, 0, 0), &g, Duration::HALF),
            Event::melodic(at(1, 2, 0), &d, Duration::HALF),
        ],
    );

    let arp = [n(E, 3), n(B, 3), n(G, 4), n(B, 3), n(E, 4), n(B, 3), n(G, 4), n(Fs, 4)];
    let arp_c = [n(C, 3), n(G, 3), n(E, 4), n(G, 3), n(B, 3), n(G, 3), n(E, 4), n(D, 4)];
    let sodium = sequence(
        "Sodium Glow",
        arp.iter()
            .chain(arp_c.iter())
            .enumerate()
            .map(|(i, &p)| Event::melodic(eighth(i as u32), &[p], Duration::EIGHTH).with_velocity(0.55))
            .collect(),
    );

    let rust_belt = sequence(
        "Rust Belt",
        (0..8)
            .map(|beat| {
                let chord = if beat < 4 { &am } else { &em };
                Event::melodic(at(beat / 4, beat % 4, 2), chord, Duration::SIXTEENTH)
            })
            .collect(),
    );

    let night_shift = sequence(
        "Night Shift",
        vec![
            Event::melodic(at(0, 0, 0), &em, Duration::DOTTED_QUARTER),
            Event::melodic(at(0, 1, 2), &em, Duration::EIGHTH).with_velocity(0.4),
            Event::melodic(at(0, 2, 0), &d, Duration::HALF),
            Event::melodic(at(1, 0, 0), &cmaj7, Duration::DOTTED_QUARTER),
            Event::melodic(at(1, 1, 2), &cmaj7, Duration::EIGHTH).with_velocity(0.4),
            Event::melodic(at(1, 2, 0), &b, Duration::HALF),
        ],
    );

    definition(
        InstrumentKey::Guitar,
        "Guitar",
        vec![driftwood, sodium, rust_belt, night_shift],
    )
}

fn synth() -> InstrumentDefinition {
    let haze = sequence(
        "Sodium Haze",
        vec![
            Event::melodic(at(0, 0, 0), &[n(E, 3), n(G, 3), n(B, 3), n(Fs, 4)], Duration::WHOLE),
            Event::melodic(at(1, 0, 0), &[n(C, 3), n(E, 3), n(G, 3), n(B, 3)], Duration::WHOLE),
        ],
    );

    let overpass = sequence(
        "Overpass",
        vec![
            Event::melodic(at(0, 0, 0), &[n(A, 3), n(C, 4), n(E, 4), n(G, 4)], Duration::WHOLE),
            Event::melodic(at(1, 0, 0), &[n(E, 3), n(G, 3), n(B, 3), n(D, 4)], Duration::WHOLE),
        ],
    );

    let bloom = sequence(
        "Static Bloom",
        vec![
            Event::melodic(at(0, 0, 0), &[n(G, 3), n(B, 3), n(D, 4), n(A, 4)], Duration::HALF),
            Event::melodic(at(0, 2, 0), &[n(D, 3), n(Fs, 3), n(A, 3), n(E, 4)], Duration::HALF),
            Event::melodic(at(1, 0, 0), &[n(E, 3), n(G, 3), n(B, 3)], Duration::WHOLE),
        ],
    );

    let cold_neon = sequence(
        "Cold Neon",
        vec![
            Event::melodic(at(0, 0, 0), &[n(B, 4)], Duration::DOTTED_HALF).with_velocity(0.35),
            Event::melodic(at(0, 3, 0), &[n(A, 4)], Duration::QUARTER).with_velocity(0.3),
            Event::melodic(at(1, 0, 0), &[n(G, 4)], Duration::HALF).with_velocity(0.35),
            Event::melodic(at(1, 2, 0), &[n(Fs, 4)], Duration::HALF).with_velocity(0.3),
        ],
    );

    definition(
        InstrumentKey::Synth,
        "Synth",
        vec![haze, overpass, bloom, cold_neon],
    )
}

fn bass() -> InstrumentDefinition {
    let pulse = sequence(
        "Pulse",
        (0..16)
            .map(|i| {
                let root = if i < 8 { n(E, 2) } else { n(C, 2) };
                Event::melodic(eighth(i), &[root], Duration::EIGHTH)
            })
            .collect(),
    );

    let walk_notes = [n(E, 2), n(G, 2), n(A, 2), n(B, 2), n(C, 3), n(B, 2), n(A, 2), n(G, 2)];
    let walk = sequence(
        "Walk",
        walk_notes
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let i = i as u32;
                Event::melodic(at(i / 4, i % 4, 0), &[p], Duration::QUARTER)
            })
            .collect(),
    );

    let octaves = sequence(
        "Octaves",
        (0..16)
            .map(|i| {
                let octave = if i % 2 == 0 { 2 } else { 3 };
                let class = if i < 8 { E } else { C };
                Event::melodic(eighth(i), &[n(class, octave)], Duration::SIXTEENTH)
            })
            .collect(),
    );

    let drone = sequence(
        "Drone",
        vec![
            Event::melodic(at(0, 0, 0), &[n(E, 2)], Duration::HALF),
            Event::melodic(at(0, 2, 0), &[n(E, 2)], Duration::HALF).with_velocity(0.6),
            Event::melodic(at(1, 0, 0), &[n(C, 2)], Duration::HALF),
            Event::melodic(at(1, 2, 0), &[n(D, 2)], Duration::HALF),
        ],
    );

    definition(
        InstrumentKey::Bass,
        "Bass",
        vec![pulse, walk, octaves, drone],
    )
}

fn drums() -> InstrumentDefinition {
    use DrumHit::{Hat, Kick, Snare};

    let hats = |velocity: f32| -> Vec<Event> {
        (0..16)
            .map(|i| Event::drum(eighth(i), Hat).with_velocity(velocity))
            .collect()
    };

    let mut motorik = hats(0.5);
    for bar in 0..2 {
        motorik.push(Event::drum(at(bar, 0, 0), Kick));
        motorik.push(Event::drum(at(bar, 2, 0), Kick));
        motorik.push(Event::drum(at(bar, 1, 0), Snare));
        motorik.push(Event::drum(at(bar, 3, 0), Snare));
    }

    let mut four_floor: Vec<Event> = (0..16)
        .filter(|i| i % 2 == 1)
        .map(|i| Event::drum(eighth(i), Hat).with_velocity(0.6))
        .collect();
    for beat in 0..8 {
        four_floor.push(Event::drum(at(beat / 4, beat % 4, 0), Kick));
    }
    for bar in 0..2 {
        four_floor.push(Event::drum(at(bar, 1, 0), Snare));
        four_floor.push(Event::drum(at(bar, 3, 0), Snare));
    }

    let mut broken = hats(0.45);
    broken.extend([
        Event::drum(at(0, 0, 0), Kick),
        Event::drum(at(0, 1, 2), Kick).with_velocity(0.7),
        Event::drum(at(0, 2, 2), Kick),
        Event::drum(at(0, 3, 0), Snare),
        Event::drum(at(1, 0, 2), Kick).with_velocity(0.7),
        Event::drum(at(1, 1, 0), Snare),
        Event::drum(at(1, 2, 0), Kick),
        Event::drum(at(1, 3, 0), Snare),
        Event::drum(at(1, 3, 3), Snare).with_velocity(0.4).with_duration(Duration::SIXTEENTH),
    ]);

    let sparse = vec![
        Event::drum(at(0, 0, 0), Kick),
        Event::drum(at(0, 2, 0), Hat).with_velocity(0.4),
        Event::drum(at(0, 3, 0), Snare),
        Event::drum(at(1, 0, 0), Kick),
        Event::drum(at(1, 2, 0), Hat).with_velocity(0.4),
        Event::drum(at(1, 3, 0), Snare),
    ];

    definition(
        InstrumentKey::Drums,
        "Drums",
        vec![
            sequence("Motorik", motorik),
            sequence("Four Floor", four_floor),
            sequence("Broken", broken),
            sequence("Sparse", sparse),
        ],
    )
}
