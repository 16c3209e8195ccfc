//! What the panel grid has switched on, and how loud each row is.

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, InstrumentKey};

pub const EMPTY_LABEL: &str = "Click a panel to add an instrument to the mix";
const LABEL_SEPARATOR: &str = " • ";

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrumentSelection {
    pub instrument: InstrumentKey,
    pub sequence_index: usize,
    pub enabled: bool,
}

impl InstrumentSelection {
    pub fn new(instrument: InstrumentKey) -> Self {
        Self {
            instrument,
            sequence_index: 0,
            enabled: false,
        }
    }
}

/// One selection per catalog instrument, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selections {
    entries: Vec<InstrumentSelection>,
}

impl Selections {
    /// Everything off, first column selected.
    pub fn defaults(catalog: &Catalog) -> Self {
        Self {
            entries: catalog
                .instruments()
                .iter()
                .map(|def| InstrumentSelection::new(def.key))
                .collect(),
        }
    }

    pub fn as_slice(&self) -> &[InstrumentSelection] {
        &self.entries
    }

    pub fn get(&self, key: InstrumentKey) -> Option<&InstrumentSelection> {
        self.entries.iter().find(|s| s.instrument == key)
    }

    /// Swap in a whole new list (the randomized "play" result).
    pub fn replace(&mut self, entries: Vec<InstrumentSelection>) {
        self.entries = entries;
    }

    /// Click on the panel at (`key`, `column`).
    ///
    /// Clicking the panel that is already playing turns the instrument off.
    /// Any other click moves to that column and turns it on, including a
    /// click on a disabled instrument's remembered column.
    pub fn toggle_panel(&mut self, key: InstrumentKey, column: usize) {
        let Some(entry) = self.entries.iter_mut().find(|s| s.instrument == key) else {
            return;
        };

        if entry.enabled && entry.sequence_index == column {
            entry.enabled = false;
        } else {
            entry.sequence_index = column;
            entry.enabled = true;
        }
    }

    pub fn any_enabled(&self) -> bool {
        self.entries.iter().any(|s| s.enabled)
    }

    /// `"Guitar: Driftwood • Drums: Sparse"`, or the placeholder when
    /// nothing is on.
    pub fn active_label(&self, catalog: &Catalog) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .filter(|s| s.enabled)
            .filter_map(|s| {
                let def = catalog.get(s.instrument)?;
                let sequence = def.sequences.get(s.sequence_index)?;
                Some(format!("{}: {}", def.display_name, sequence.name))
            })
            .collect();

        if parts.is_empty() {
            EMPTY_LABEL.to_string()
        } else {
            parts.join(LABEL_SEPARATOR)
        }
    }
}

/// Every instrument on, each on a random column.
pub fn randomized<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Vec<InstrumentSelection> {
    catalog
        .instruments()
        .iter()
        .map(|def| InstrumentSelection {
            instrument: def.key,
            sequence_index: if def.sequences.is_empty() {
                0
            } else {
                rng.gen_range(0..def.sequences.len())
            },
            enabled: true,
        })
        .collect()
}

/// Per-instrument gain in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volumes([f32; 4]);

impl Default for Volumes {
    fn default() -> Self {
        Volumes([0.75, 0.62, 0.82, 0.88])
    }
}

impl Volumes {
    pub fn get(&self, key: InstrumentKey) -> f32 {
        self.0[key.index()]
    }

    pub fn set(&mut self, key: InstrumentKey, gain: f32) {
        self.0[key.index()] = gain.clamp(0.0, 1.0);
    }

    /// As a 0–100 slider position.
    pub fn slider(&self, key: InstrumentKey) -> u8 {
        (self.get(key) * 100.0).round() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn same_panel_twice_turns_off() {
        let catalog = Catalog::builtin();
        let mut selections = Selections::defaults(&catalog);

        selections.toggle_panel(InstrumentKey::Synth, 2);
        let synth = selections.get(InstrumentKey::Synth).unwrap();
        assert!(synth.enabled);
        assert_eq!(synth.sequence_index, 2);

        selections.toggle_panel(InstrumentKey::Synth, 2);
        assert!(!selections.get(InstrumentKey::Synth).unwrap().enabled);
    }

    #[test]
    fn other_column_switches_without_disabling() {
        let catalog = Catalog::builtin();
        let mut selections = Selections::defaults(&catalog);

        selections.toggle_panel(InstrumentKey::Bass, 0);
        selections.toggle_panel(InstrumentKey::Bass, 3);
        let bass = selections.get(InstrumentKey::Bass).unwrap();
        assert!(bass.enabled);
        assert_eq!(bass.sequence_index, 3);
    }

    #[test]
    fn disabled_remembered_column_re_enables() {
        let catalog = Catalog::builtin();
        let mut selections = Selections::defaults(&catalog);

        // index 0 is remembered but off; clicking it turns it on
        selections.toggle_panel(InstrumentKey::Guitar, 0);
        assert!(selections.get(InstrumentKey::Guitar).unwrap().enabled);
    }

    #[test]
    fn label_lists_enabled_parts() {
        let catalog = Catalog::builtin();
        let mut selections = Selections::defaults(&catalog);
        assert_eq!(selections.active_label(&catalog), EMPTY_LABEL);

        selections.toggle_panel(InstrumentKey::Guitar, 0);
        selections.toggle_panel(InstrumentKey::Drums, 3);
        assert_eq!(selections.active_label(&catalog), "Guitar: Driftwood • Drums: Sparse");
    }

    #[test]
    fn randomized_enables_everything_in_range() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let list = randomized(&catalog, &mut rng);
            assert_eq!(list.len(), InstrumentKey::ALL.len());
            for s in &list {
                assert!(s.enabled);
                assert!(s.sequence_index < catalog.sequence_count(s.instrument));
            }
        }
    }

    #[test]
    fn volumes_clamp_and_convert() {
        let mut volumes = Volumes::default();
        assert_eq!(volumes.slider(InstrumentKey::Synth), 62);

        volumes.set(InstrumentKey::Bass, 1.7);
        assert_eq!(volumes.get(InstrumentKey::Bass), 1.0);
    }
}
