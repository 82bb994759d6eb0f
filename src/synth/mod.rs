//! Note bookkeeping and the realtime render loop.
//!
//! Two threads share one [`NoteRegistry`]:
//!
//! - the input thread drives a [`Controller`], which adds, releases and prunes
//!   notes under the registry lock at a modest tick rate;
//! - the audio callback drives an [`AudioRenderer`], which never blocks and
//!   fills every buffer it is handed.
//!
//! [`Synth`] wires both halves to the same registry, clock and instrument bank.

pub mod clock;
pub mod controller;
pub mod note;
pub mod registry;
pub mod renderer;

use std::sync::Arc;

use crate::{
    config::EngineConfig,
    error::{Error, Result},
    instruments::{InstrumentBank, InstrumentId},
    io::keymap::KeyMap,
};

pub use clock::SampleClock;
pub use controller::{Controller, InputEvent, TickReport};
pub use note::Note;
pub use registry::{NoteRegistry, SharedRegistry};
pub use renderer::AudioRenderer;

/// Composition root: validated config plus the instruments to play.
pub struct Synth {
    config: EngineConfig,
    instruments: InstrumentBank,
    keymap: KeyMap,
    instrument: InstrumentId,
}

impl Synth {
    pub fn new(config: EngineConfig, instruments: InstrumentBank) -> Result<Self> {
        config.validate()?;
        let instrument = instruments.id(0).ok_or(Error::EmptyBank)?;

        Ok(Self {
            config,
            instruments,
            keymap: KeyMap::chromatic(),
            instrument,
        })
    }

    /// Replace the default chromatic key layout.
    pub fn keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Instrument played by new notes until the controller selects another.
    /// Defaults to the first instrument in the bank.
    pub fn instrument(mut self, id: InstrumentId) -> Self {
        if self.instruments.get(id).is_some() {
            self.instrument = id;
        }
        self
    }

    /// Split into the input-side controller and the audio-side renderer.
    pub fn into_parts(self) -> (Controller, AudioRenderer) {
        let registry = NoteRegistry::shared(self.config.note_capacity);
        let clock = SampleClock::new(self.config.sample_rate);
        let instruments = Arc::new(self.instruments);

        log::debug!(
            "synth ready: {} instrument(s), {} Hz, headroom {}",
            instruments.len(),
            self.config.sample_rate,
            self.config.amplitude / 4
        );

        let renderer = AudioRenderer::new(
            registry.clone(),
            instruments.clone(),
            clock.clone(),
            self.config.amplitude,
        );
        let mut controller = Controller::new(registry, instruments, clock, self.keymap, self.instrument);
        controller.set_gate_timeout(self.config.gate_timeout);

        (controller, renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_bank() {
        let result = Synth::new(EngineConfig::default(), InstrumentBank::new());
        assert!(matches!(result, Err(Error::EmptyBank)));
    }

    #[test]
    fn parts_share_registry_and_clock() {
        let bank = InstrumentBank::standard().unwrap();
        let saw = bank.id(2).unwrap();
        let (mut controller, mut renderer) = Synth::new(EngineConfig::default(), bank)
            .unwrap()
            .instrument(saw)
            .into_parts();
        assert_eq!(controller.instrument_id(), saw);

        let mut out = vec![0i16; 512];
        renderer.render(&mut out);
        assert_eq!(controller.now(), 512.0 / 44_100.0);

        controller.tick([InputEvent::KeyDown { key: 'k', repeat: false }]);
        renderer.render(&mut out);
        assert!(out.iter().any(|&s| s != 0));
    }

    #[test]
    fn custom_keymap_reaches_the_controller() {
        let bank = InstrumentBank::standard().unwrap();
        let (mut controller, _) = Synth::new(EngineConfig::default(), bank)
            .unwrap()
            .keymap(KeyMap::from_keys(&['a', 'b'], 0))
            .into_parts();

        assert_eq!(controller.keymap().len(), 2);
        assert_eq!(controller.tick([InputEvent::KeyDown { key: 'z', repeat: false }]).added, 0);
        let report = controller.tick([InputEvent::KeyDown { key: 'b', repeat: false }]);
        assert_eq!(report.added, 1);
        assert_eq!(report.held, vec![1]);
    }
}
