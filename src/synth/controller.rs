use std::sync::Arc;

use super::{clock::SampleClock, registry::SharedRegistry};
use crate::{
    instruments::{Instrument, InstrumentBank, InstrumentId},
    io::keymap::KeyMap,
};

/// Keyboard activity, already stripped of any windowing/terminal specifics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown { key: char, repeat: bool },
    KeyUp { key: char },
}

/// What one input tick changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub added: usize,
    pub released: usize,
    pub pruned: usize,
    /// Notes left in the registry after pruning.
    pub live: usize,
    /// Ids of keys still held down.
    pub held: Vec<u8>,
    /// Total blocks the renderer has left silent on lock contention.
    pub dropouts: u64,
}

/// Input-side driver of the registry.
///
/// Each [`tick`](Controller::tick) takes the registry lock once, applies the
/// batch of key events, releases notes past the gate timeout and prunes dead
/// notes before unlocking.
///
/// With a gate timeout set the input is assumed to have no key-up and no
/// repeat flag, so a key-down for an id that is still held is treated as
/// auto-repeat and ignored.
pub struct Controller {
    registry: SharedRegistry,
    instruments: Arc<InstrumentBank>,
    clock: SampleClock,
    keymap: KeyMap,
    instrument: InstrumentId,
    gate_timeout: Option<f64>,
    dropouts: u64,
}

impl Controller {
    pub fn new(
        registry: SharedRegistry,
        instruments: Arc<InstrumentBank>,
        clock: SampleClock,
        keymap: KeyMap,
        instrument: InstrumentId,
    ) -> Self {
        Self {
            registry,
            instruments,
            dropouts: clock.dropouts(),
            clock,
            keymap,
            instrument,
            gate_timeout: None,
        }
    }

    /// Release presses automatically after `seconds`, for inputs that never
    /// deliver key-up.
    pub fn set_gate_timeout(&mut self, seconds: Option<f64>) {
        self.gate_timeout = seconds;
    }

    pub fn tick<I>(&mut self, events: I) -> TickReport
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut report = TickReport::default();
        let mut registry = self.registry.lock();
        let now = self.clock.seconds();

        for event in events {
            match event {
                InputEvent::KeyDown { repeat: true, .. } => {}
                InputEvent::KeyDown { key, repeat: false } => {
                    let Some(template) = self.keymap.get(key) else {
                        continue;
                    };
                    if self.gate_timeout.is_some() && registry.is_held(template.id) {
                        continue;
                    }
                    registry.add_note(template.id, template.frequency, self.instrument, now);
                    report.added += 1;
                }
                InputEvent::KeyUp { key } => {
                    if let Some(template) = self.keymap.get(key) {
                        report.released += registry.release_note(template.id, now);
                    }
                }
            }
        }

        if let Some(hold) = self.gate_timeout {
            report.released += registry.release_held_longer_than(now, hold);
        }

        report.pruned = registry.prune_dead();
        report.live = registry.len();
        report.held = registry.held_ids();
        drop(registry);

        report.dropouts = self.clock.dropouts();
        if report.dropouts > self.dropouts {
            log::debug!(
                "{} block(s) rendered silent on lock contention ({} total)",
                report.dropouts - self.dropouts,
                report.dropouts
            );
            self.dropouts = report.dropouts;
        }

        if report.pruned > 0 {
            log::debug!("pruned {} finished note(s), {} live", report.pruned, report.live);
        }
        report
    }

    /// Play subsequent notes through `id`. Notes already sounding keep their
    /// instrument. Returns false if the bank has no such instrument.
    pub fn select_instrument(&mut self, id: InstrumentId) -> bool {
        if self.instruments.get(id).is_none() {
            return false;
        }
        self.instrument = id;
        log::info!("instrument: {}", self.instruments[id].kind());
        true
    }

    pub fn instrument_id(&self) -> InstrumentId {
        self.instrument
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instruments[self.instrument]
    }

    pub fn instruments(&self) -> &InstrumentBank {
        &self.instruments
    }

    /// Release everything still held.
    pub fn release_all(&mut self) -> usize {
        let now = self.clock.seconds();
        self.registry.lock().release_all(now)
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn now(&self) -> f64 {
        self.clock.seconds()
    }
}
