use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_2_PI, TAU};

/*
Stateless Oscillator Bank
=========================

Every waveform is evaluated directly from the absolute time `t` - there is no
running phase accumulator. That is what lets an instrument compute any note at
any instant from nothing but the note's timestamps.

Phase Modulation
----------------

  phase = 2π·f·t + depth·f·sin(2π·rate·t)

The second term wobbles the phase slowly around its nominal value. With a
small depth (0.001) and a rate of a few Hz this is vibrato. Note that the
modulation depth is scaled by the carrier frequency, so higher notes wobble
by the same musical interval as lower ones.

This is phase modulation, not true frequency modulation: the modulator is
added to the phase, not integrated into it.

Waveforms
---------

  Sine      sin(phase)
  Square    +1 where sin(phase) > 0, else -1 (never 0)
  Triangle  (2/π)·asin(sin(phase))
  Saw       (2/π)·Σ sin(k·phase)/k for k = 1..39
            Additive Fourier series, truncated to bound aliasing. Gibbs
            ringing overshoots ±1 slightly near the discontinuity.
  Noise     uniform in [-1, 1), independent of time and pitch

Noise is the only waveform that needs state. The caller hands in the random
source, so the audio thread can own a pre-seeded generator and never touch the
OS entropy pool or lazily initialized thread-locals from inside the callback.
*/

/// Number of partials summed by the additive sawtooth.
pub const SAW_HARMONICS: u32 = 39;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Saw,
    Noise,
}

/// Phase modulator applied to a carrier: `depth·f·sin(2π·hertz·t)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseModulation {
    pub amplitude: f32,
    pub hertz: f32,
}

impl PhaseModulation {
    /// No modulation.
    pub const NONE: Self = Self {
        amplitude: 0.0,
        hertz: 0.0,
    };

    /// Gentle 5 Hz vibrato shared by all built-in instruments.
    pub const VIBRATO: Self = Self {
        amplitude: 0.001,
        hertz: 5.0,
    };
}

/// Instantaneous phase (radians) of a carrier at `freq` Hz, time `t` seconds.
#[inline]
pub fn phase(t: f64, freq: f32, modulation: PhaseModulation) -> f64 {
    let freq = freq as f64;
    let wobble = modulation.amplitude as f64 * freq * (TAU * modulation.hertz as f64 * t).sin();
    TAU * freq * t + wobble
}

/// One sample of `waveform` at time `t` for a carrier at `freq` Hz.
///
/// `rng` is only drawn from by [`Waveform::Noise`].
pub fn wave<R: Rng + ?Sized>(
    waveform: Waveform,
    t: f64,
    freq: f32,
    modulation: PhaseModulation,
    rng: &mut R,
) -> f32 {
    match waveform {
        Waveform::Sine => phase(t, freq, modulation).sin() as f32,
        Waveform::Square => {
            if phase(t, freq, modulation).sin() > 0.0 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => (phase(t, freq, modulation).sin().asin() * FRAC_2_PI) as f32,
        Waveform::Saw => {
            let phase = phase(t, freq, modulation);
            let partials: f64 = (1..=SAW_HARMONICS)
                .map(|k| {
                    let k = k as f64;
                    (k * phase).sin() / k
                })
                .sum();
            (partials * FRAC_2_PI) as f32
        }
        Waveform::Noise => 2.0 * rng.random::<f32>() - 1.0,
    }
}
