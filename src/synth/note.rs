use crate::instruments::InstrumentId;

/// A single keypress sounding through an instrument.
///
/// Held vs released is derived from the timestamps: a note is held while it
/// has no off time, or while its off time predates its on time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Key identity. Not unique: pressing a key twice without releasing it
    /// yields two notes with the same id.
    pub id: u8,
    pub frequency: f32,
    pub time_on: f64,
    pub time_off: Option<f64>,
    /// Cleared by the renderer once the envelope has died out.
    pub active: bool,
    pub instrument: InstrumentId,
}

impl Note {
    pub fn new(id: u8, frequency: f32, instrument: InstrumentId, time_on: f64) -> Self {
        Self {
            id,
            frequency,
            time_on,
            time_off: None,
            active: true,
            instrument,
        }
    }

    pub fn is_held(&self) -> bool {
        match self.time_off {
            Some(off) => self.time_on > off,
            None => true,
        }
    }

    /// Mark the key as released at `now`. No-op if already released.
    pub fn release(&mut self, now: f64) -> bool {
        if self.is_held() {
            self.time_off = Some(now);
            true
        } else {
            false
        }
    }
}
