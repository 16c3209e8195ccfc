//! The contract a front end drives.
//!
//! A session owns the selection state and the manager, and turns the three
//! kinds of user input (panel clicks, volume sliders, play/stop) into
//! manager calls. Every selection change goes through the same
//! "update the list, then rebuild" path.

use std::sync::Arc;

use crate::{
    catalog::{Catalog, InstrumentKey},
    config::MixConfig,
    error::ConfigError,
    mixer::{GraphManager, OutputGate},
    selection::Selections,
};

pub struct FacadeSession<G: OutputGate> {
    manager: GraphManager<G>,
    selections: Selections,
    ready: bool,
}

impl<G: OutputGate> FacadeSession<G> {
    pub fn new(config: MixConfig, gate: G) -> Result<Self, ConfigError> {
        Ok(Self::from_manager(GraphManager::new(config, gate)?))
    }

    pub fn with_catalog(config: MixConfig, catalog: Arc<Catalog>, gate: G) -> Result<Self, ConfigError> {
        Ok(Self::from_manager(GraphManager::with_catalog(config, catalog, gate)?))
    }

    pub fn from_manager(manager: GraphManager<G>) -> Self {
        let selections = Selections::defaults(manager.catalog());
        Self {
            manager,
            selections,
            ready: false,
        }
    }

    /// The front end is up: build the initial graph.
    pub fn start(&mut self) {
        self.ready = true;
        self.rebuild();
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn rebuild(&mut self) {
        if self.ready {
            self.manager.rebuild(self.selections.as_slice());
        }
    }

    pub fn click(&mut self, key: InstrumentKey, column: usize) {
        self.selections.toggle_panel(key, column);
        self.manager.set_play_intent(true);
        self.rebuild();
    }

    /// `slider` is the raw 0–100 control value.
    pub fn set_volume(&mut self, key: InstrumentKey, slider: f32) {
        self.manager.change_volume(key, slider);
    }

    pub fn play(&mut self) {
        if let Some(randomized) = self.manager.play_all(self.selections.as_slice()) {
            self.selections.replace(randomized);
            self.rebuild();
        }
    }

    pub fn stop(&mut self) {
        self.manager.stop_all();
    }

    pub fn toggle_transport(&mut self) {
        if self.is_playing() {
            self.stop();
        } else {
            self.play();
        }
    }

    pub fn label(&self) -> String {
        self.selections.active_label(self.manager.catalog())
    }

    pub fn is_playing(&self) -> bool {
        self.manager.is_playing()
    }

    pub fn volume_slider(&self, key: InstrumentKey) -> u8 {
        (self.manager.volume(key) * 100.0).round() as u8
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn manager(&self) -> &GraphManager<G> {
        &self.manager
    }

    pub fn render(&mut self, out: &mut [f32]) {
        self.manager.render(out);
    }

    pub fn shutdown(&mut self) {
        self.manager.dispose();
        self.ready = false;
    }
}
