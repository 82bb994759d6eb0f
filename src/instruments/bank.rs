use std::ops::Index;

use super::{Instrument, InstrumentKind};
use crate::error::Result;

/// Handle to an instrument held by an [`InstrumentBank`].
///
/// Notes store this instead of a reference: the bank owns the instruments for
/// the life of the program, notes come and go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstrumentId(usize);

impl InstrumentId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena of long-lived, immutable instruments.
///
/// Built once at startup, then shared read-only (typically behind an `Arc`)
/// between the input thread and the audio callback.
#[derive(Debug, Clone, Default)]
pub struct InstrumentBank {
    instruments: Vec<Instrument>,
}

impl InstrumentBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bell, Harmonica and PureSaw presets, in that order.
    pub fn standard() -> Result<Self> {
        let mut bank = Self::new();
        for kind in InstrumentKind::ALL {
            bank.add(Instrument::preset(kind)?);
        }
        Ok(bank)
    }

    pub fn add(&mut self, instrument: Instrument) -> InstrumentId {
        self.instruments.push(instrument);
        InstrumentId(self.instruments.len() - 1)
    }

    pub fn get(&self, id: InstrumentId) -> Option<&Instrument> {
        self.instruments.get(id.0)
    }

    /// First instrument playing the given recipe.
    pub fn find(&self, kind: InstrumentKind) -> Option<InstrumentId> {
        self.instruments
            .iter()
            .position(|instrument| instrument.kind() == kind)
            .map(InstrumentId)
    }

    /// Handle for the `index`-th instrument, if it exists.
    pub fn id(&self, index: usize) -> Option<InstrumentId> {
        (index < self.instruments.len()).then_some(InstrumentId(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (InstrumentId, &Instrument)> {
        self.instruments
            .iter()
            .enumerate()
            .map(|(index, instrument)| (InstrumentId(index), instrument))
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

impl Index<InstrumentId> for InstrumentBank {
    type Output = Instrument;

    fn index(&self, id: InstrumentId) -> &Self::Output {
        &self.instruments[id.0]
    }
}
