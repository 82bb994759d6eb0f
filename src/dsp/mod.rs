//! Low-level DSP primitives used by the instruments.
//!
//! Everything here is a pure function of time: no running phase, no envelope
//! stage. That keeps the primitives allocation-free and realtime-safe, and lets
//! the same parameters be shared by any number of simultaneous notes.

/// Attack/decay/sustain/release envelope evaluated from note timestamps.
pub mod envelope;
/// Oscillator waveforms, phase modulation and noise.
pub mod oscillator;

pub use envelope::EnvelopeParams;
pub use oscillator::{wave, PhaseModulation, Waveform};
