use rand::{rngs::SmallRng, SeedableRng};
#[cfg(feature = "rtrb")]
use rtrb::{Producer, PushError};
use std::sync::Arc;

use super::{clock::SampleClock, note::Note, registry::SharedRegistry};
use crate::instruments::{InstrumentBank, Sound};

/*
Render Loop
===========

Called from the audio callback with a buffer to fill. For every sample:

  1. t = sample_index / sample_rate
  2. ask each note's instrument for (value, alive)
  3. store alive back into the note (the only write the callback makes)
  4. sum, scale by a fixed headroom, saturate into i16

Headroom is a constant quarter of the peak amplitude per note. It does not
adapt to how many notes are playing, so a loud chord can clip; the i16
conversion saturates rather than wrapping.

The callback never blocks. It only try_locks the registry: if the input thread
happens to hold the lock, this block is silence and the clock's dropout count
goes up. The sample clock still advances by the full buffer length either way,
so time never stalls and the backend always gets exactly the samples it asked
for.

Nor does it allocate. Noise comes from a SmallRng seeded when the renderer is
built, on the thread that builds it, and owned by the renderer from then on.
*/

pub struct AudioRenderer {
    registry: SharedRegistry,
    instruments: Arc<InstrumentBank>,
    clock: SampleClock,
    headroom: f32,
    noise: SmallRng,
    #[cfg(feature = "rtrb")]
    scope: Option<Producer<f32>>,
}

impl AudioRenderer {
    /// `amplitude` is the full-scale output level; each note is mixed in at a
    /// quarter of it.
    pub fn new(
        registry: SharedRegistry,
        instruments: Arc<InstrumentBank>,
        clock: SampleClock,
        amplitude: i16,
    ) -> Self {
        Self {
            registry,
            instruments,
            clock,
            headroom: amplitude as f32 / 4.0,
            noise: SmallRng::from_rng(&mut rand::rng()),
            #[cfg(feature = "rtrb")]
            scope: None,
        }
    }

    /// Mirror the rendered signal (normalized to -1..1) into a ring buffer for
    /// visualization. Samples are dropped when the ring is full.
    #[cfg(feature = "rtrb")]
    pub fn with_scope(mut self, tx: Producer<f32>) -> Self {
        self.scope = Some(tx);
        self
    }

    /// Fill `out` with the next `out.len()` samples.
    pub fn render(&mut self, out: &mut [i16]) {
        let start = self.clock.advance(out.len() as u64);

        match self.registry.try_lock() {
            Some(mut registry) if !registry.is_empty() => {
                let notes = registry.notes_mut();
                for (offset, sample) in out.iter_mut().enumerate() {
                    let t = self.clock.time_of(start + offset as u64);
                    let mix = mix_notes(notes, &self.instruments, t, &mut self.noise);
                    *sample = (mix * self.headroom) as i16;
                }
            }
            Some(_) => out.fill(0),
            // Input thread is mid-update
            None => {
                self.clock.record_dropout();
                out.fill(0);
            }
        }

        #[cfg(feature = "rtrb")]
        self.tap(out);
    }

    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }

    #[cfg(feature = "rtrb")]
    fn tap(&mut self, block: &[i16]) {
        let Some(tx) = self.scope.as_mut() else {
            return;
        };
        for &s in block {
            if let Err(PushError::Full(_)) = tx.push(s as f32 / i16::MAX as f32) {
                break;
            }
        }
    }
}

/// Sum every note's output at time `t`, recording which notes are still alive.
#[inline]
fn mix_notes(notes: &mut [Note], instruments: &InstrumentBank, t: f64, noise: &mut SmallRng) -> f32 {
    let mut mix = 0.0;
    for note in notes.iter_mut() {
        let sound = match instruments.get(note.instrument) {
            Some(instrument) => {
                instrument.sound(note.frequency, t, note.time_on, note.time_off, noise)
            }
            None => Sound::SILENT,
        };
        note.active = sound.alive;
        mix += sound.value;
    }
    mix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{instruments::InstrumentBank, synth::registry::NoteRegistry};

    fn renderer() -> (AudioRenderer, SharedRegistry, InstrumentBank) {
        let bank = InstrumentBank::standard().unwrap();
        let registry = NoteRegistry::shared(16);
        let clock = SampleClock::new(44_100);
        let renderer = AudioRenderer::new(registry.clone(), Arc::new(bank.clone()), clock, 20_000);
        (renderer, registry, bank)
    }

    #[test]
    fn empty_registry_renders_full_silence() {
        let (mut renderer, _, _) = renderer();
        let mut out = vec![7i16; 512];
        renderer.render(&mut out);
        assert_eq!(out.len(), 512);
        assert!(out.iter().all(|&s| s == 0));
        assert_eq!(renderer.clock().samples(), 512);
        assert_eq!(renderer.clock().dropouts(), 0);
    }

    #[test]
    fn contended_lock_yields_silence_and_still_advances() {
        let (mut renderer, registry, bank) = renderer();
        registry.lock().add_note(0, 440.0, bank.id(1).unwrap(), 0.0);

        let guard = registry.lock();
        let mut out = vec![1i16; 256];
        renderer.render(&mut out);
        drop(guard);

        assert!(out.iter().all(|&s| s == 0));
        assert_eq!(renderer.clock().samples(), 256);
        assert_eq!(renderer.clock().dropouts(), 1);
        assert!(registry.lock().notes()[0].active);
    }

    #[test]
    fn live_note_produces_signal() {
        let (mut renderer, registry, bank) = renderer();
        registry.lock().add_note(12, 440.0, bank.id(1).unwrap(), 0.0);

        let mut out = vec![0i16; 4_410];
        renderer.render(&mut out);
        let peak = out.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);
        assert!(peak > 1_000, "peak {peak}");
        assert!(registry.lock().notes()[0].active);
    }

    #[test]
    fn finished_note_is_marked_inactive_but_not_removed() {
        let (mut renderer, registry, bank) = renderer();
        {
            let mut registry = registry.lock();
            registry.add_note(0, 220.0, bank.id(2).unwrap(), 0.0);
            registry.release_note(0, 0.0);
        }

        let mut out = vec![0i16; 64];
        renderer.render(&mut out);

        let registry = registry.lock();
        assert_eq!(registry.len(), 1);
        assert!(!registry.notes()[0].active);
        assert!(out.iter().all(|&s| s == 0));
    }

    #[test]
    fn mix_saturates_instead_of_wrapping() {
        let (mut renderer, registry, bank) = renderer();
        {
            let mut registry = registry.lock();
            for _ in 0..32 {
                registry.add_note(5, 220.0, bank.id(1).unwrap(), 0.0);
            }
        }
        let mut out = vec![0i16; 8_820];
        renderer.render(&mut out);
        assert!(out.iter().any(|&s| s == i16::MAX || s == i16::MIN));
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn scope_receives_normalized_samples() {
        let (renderer, _, _) = renderer();
        let (tx, mut rx) = rtrb::RingBuffer::<f32>::new(8);
        let mut renderer = renderer.with_scope(tx);

        let mut out = vec![0i16; 32];
        renderer.render(&mut out);

        let mut received = 0;
        while let Ok(s) = rx.pop() {
            assert_eq!(s, 0.0);
            received += 1;
        }
        assert_eq!(received, 8);
    }
}
