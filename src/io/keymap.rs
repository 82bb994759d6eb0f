//! Computer keyboard as a one-octave piano.
//!
//! The bottom two letter rows form the keys, white notes on the lower row and
//! black notes on the row above:
//!
//! ```text
//!    S     F  G     J  K
//!  Z  X  C  V  B  N  M  ,
//!  A  B  C  D  E  F  G  A      (A3 .. A4)
//! ```
//!
//! Each key plays `440 * 2^(offset/12)` Hz for offset -12 through 0.

use std::collections::HashMap;

/// Id and pitch a key produces when pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteTemplate {
    pub id: u8,
    pub frequency: f32,
}

/// Keys of the default layout, lowest pitch first.
pub const CHROMATIC_KEYS: [char; 13] = [
    'z', 's', 'x', 'c', 'f', 'v', 'g', 'b', 'n', 'j', 'm', 'k', ',',
];

/// Reference pitch of the top key (A4).
pub const CONCERT_A: f32 = 440.0;

/// Equal-tempered frequency `semitones` away from A4.
pub fn semitone_to_freq(semitones: i32) -> f32 {
    CONCERT_A * 2.0_f32.powf(semitones as f32 / 12.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    notes: HashMap<char, NoteTemplate>,
    order: Vec<char>,
}

impl KeyMap {
    /// The default layout: 13 semitones from A3 (220 Hz) up to A4.
    pub fn chromatic() -> Self {
        Self::from_keys(&CHROMATIC_KEYS, -12)
    }

    /// Assign consecutive semitones to `keys`, starting `lowest` semitones
    /// from A4. Ids count up from 0. Keys are case-insensitive; later
    /// duplicates of a key are ignored.
    pub fn from_keys(keys: &[char], lowest: i32) -> Self {
        let mut notes = HashMap::with_capacity(keys.len());
        let mut order = Vec::with_capacity(keys.len());

        for (index, &key) in keys.iter().enumerate().take(u8::MAX as usize + 1) {
            let key = key.to_ascii_lowercase();
            if notes.contains_key(&key) {
                continue;
            }
            let template = NoteTemplate {
                id: index as u8,
                frequency: semitone_to_freq(lowest + index as i32),
            };
            notes.insert(key, template);
            order.push(key);
        }

        Self { notes, order }
    }

    /// Note for a key, or `None` if the key is unmapped.
    pub fn get(&self, key: char) -> Option<NoteTemplate> {
        self.notes.get(&key.to_ascii_lowercase()).copied()
    }

    /// Key that plays note `id`.
    pub fn key_for(&self, id: u8) -> Option<char> {
        self.order
            .iter()
            .copied()
            .find(|key| self.notes.get(key).is_some_and(|t| t.id == id))
    }

    /// Mapped keys with their notes, lowest pitch first.
    pub fn iter(&self) -> impl Iterator<Item = (char, NoteTemplate)> + '_ {
        self.order.iter().map(|key| (*key, self.notes[key]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::chromatic()
    }
}
