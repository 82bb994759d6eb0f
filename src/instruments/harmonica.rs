//! Harmonica - reedy square stack with breath.
//!
//! # How It Works
//!
//! 1. A square wave at pitch with vibrato carries the reed buzz.
//! 2. Quieter squares at 1.5x (a fifth up) and 2x (an octave up) thicken it
//!    into a chord-like reed sound.
//! 3. A little white noise adds breath.
//! 4. 100ms swell in, a tiny dip, then a strong 0.8 sustain for as long as
//!    the key is held. 100ms release.

use rand::Rng;

use crate::{
    dsp::{wave, EnvelopeParams, PhaseModulation, Waveform},
    error::Result,
};

pub(super) const VOLUME: f32 = 1.0;

pub(super) fn envelope() -> Result<EnvelopeParams> {
    EnvelopeParams::new(0.1, 0.01, 0.1, 1.0, 0.8)
}

pub(super) fn mix<R: Rng + ?Sized>(freq: f32, t: f64, rng: &mut R) -> f32 {
    1.0 * wave(Waveform::Square, t, freq, PhaseModulation::VIBRATO, rng)
        + 0.5 * wave(Waveform::Square, t, freq * 1.5, PhaseModulation::NONE, rng)
        + 0.25 * wave(Waveform::Square, t, freq * 2.0, PhaseModulation::NONE, rng)
        + 0.05 * wave(Waveform::Noise, t, 0.0, PhaseModulation::NONE, rng)
}
