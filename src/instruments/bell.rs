//! Bell - struck, ringing, slightly metallic.
//!
//! # How It Works
//!
//! 1. Three sine partials at 2x, 3x and 4x the played pitch. Skipping the
//!    fundamental and stacking upper partials gives the hollow, glassy ring.
//! 2. Only the loudest partial carries vibrato, so the tone shimmers without
//!    the whole chord wobbling.
//! 3. 10ms attack for a hard strike, then a one second decay to silence.
//!    Sustain is zero: a held bell still dies away on its own.
//! 4. One second release so a short tap keeps ringing after key-up.

use rand::Rng;

use crate::{
    dsp::{wave, EnvelopeParams, PhaseModulation, Waveform},
    error::Result,
};

pub(super) const VOLUME: f32 = 1.0;

pub(super) fn envelope() -> Result<EnvelopeParams> {
    EnvelopeParams::new(0.01, 1.0, 1.0, 1.0, 0.0)
}

pub(super) fn mix<R: Rng + ?Sized>(freq: f32, t: f64, rng: &mut R) -> f32 {
    1.0 * wave(Waveform::Sine, t, freq * 2.0, PhaseModulation::VIBRATO, rng)
        + 0.5 * wave(Waveform::Sine, t, freq * 3.0, PhaseModulation::NONE, rng)
        + 0.25 * wave(Waveform::Sine, t, freq * 4.0, PhaseModulation::NONE, rng)
}
