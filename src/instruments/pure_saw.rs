//! Pure saw - a single band-limited sawtooth.
//!
//! Bright and buzzy, all harmonics present. Snappy 10ms attack, decay and
//! release with a 0.8 sustain, so it tracks the keys closely. Played at 0.8
//! gain since the additive saw rings slightly past ±1.

use rand::Rng;

use crate::{
    dsp::{wave, EnvelopeParams, PhaseModulation, Waveform},
    error::Result,
};

pub(super) const VOLUME: f32 = 0.8;

pub(super) fn envelope() -> Result<EnvelopeParams> {
    EnvelopeParams::new(0.01, 0.01, 0.01, 1.0, 0.8)
}

pub(super) fn mix<R: Rng + ?Sized>(freq: f32, t: f64, rng: &mut R) -> f32 {
    wave(Waveform::Saw, t, freq, PhaseModulation::VIBRATO, rng)
}
