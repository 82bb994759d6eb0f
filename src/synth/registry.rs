use parking_lot::Mutex;
use std::sync::Arc;

use super::note::Note;
use crate::instruments::InstrumentId;

/// Registry shared between the input thread and the audio callback.
pub type SharedRegistry = Arc<Mutex<NoteRegistry>>;

/// Every note currently sounding, in the order the keys went down.
///
/// Mutated by the input thread under the shared lock. The audio callback only
/// flips each note's `active` flag; removal happens in [`prune_dead`] on the
/// input side.
///
/// [`prune_dead`]: NoteRegistry::prune_dead
#[derive(Debug, Clone, Default)]
pub struct NoteRegistry {
    notes: Vec<Note>,
}

impl NoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            notes: Vec::with_capacity(capacity),
        }
    }

    pub fn shared(capacity: usize) -> SharedRegistry {
        Arc::new(Mutex::new(Self::with_capacity(capacity)))
    }

    /// Start a new held note. Does not deduplicate by `id`.
    pub fn add_note(&mut self, id: u8, frequency: f32, instrument: InstrumentId, now: f64) {
        self.notes.push(Note::new(id, frequency, instrument, now));
    }

    /// Release every held note with this id. Returns how many were released.
    pub fn release_note(&mut self, id: u8, now: f64) -> usize {
        self.notes
            .iter_mut()
            .filter(|note| note.id == id)
            .map(|note| note.release(now))
            .filter(|released| *released)
            .count()
    }

    pub fn release_all(&mut self, now: f64) -> usize {
        self.notes
            .iter_mut()
            .map(|note| note.release(now))
            .filter(|released| *released)
            .count()
    }

    /// Release notes whose key has been down for at least `hold` seconds.
    ///
    /// Gate timeout for input sources that never report key-up.
    pub fn release_held_longer_than(&mut self, now: f64, hold: f64) -> usize {
        self.notes
            .iter_mut()
            .filter(|note| now - note.time_on >= hold)
            .map(|note| note.release(now))
            .filter(|released| *released)
            .count()
    }

    /// Drop every note the renderer has marked silent.
    pub fn prune_dead(&mut self) -> usize {
        let before = self.notes.len();
        self.notes.retain(|note| note.active);
        before - self.notes.len()
    }

    /// Whether any note with this id is still held.
    pub fn is_held(&self, id: u8) -> bool {
        self.notes.iter().any(|note| note.id == id && note.is_held())
    }

    /// Ids of keys still held, sorted and deduplicated.
    pub fn held_ids(&self) -> Vec<u8> {
        let mut ids: Vec<u8> = self
            .notes
            .iter()
            .filter(|note| note.is_held())
            .map(|note| note.id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub(crate) fn notes_mut(&mut self) -> &mut [Note] {
        &mut self.notes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
