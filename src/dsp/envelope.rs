#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/*
ADSR Envelope as a Pure Function of Time
========================================

This module implements a linear ADSR envelope that keeps NO per-sample state.
The amplitude of a note is computed directly from three timestamps:

  t          The time being rendered (seconds on the sample clock).
  time_on    When the key went down.
  time_off   When the key came up, or None while the key is still held.

Because nothing is accumulated sample by sample, any number of notes can share
one set of parameters, and rendering can jump to any point in time.


The Shape
---------

  Level
  start ┐     ╱╲
        │    ╱  ╲___________
  sust  │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release


Held vs Released
----------------

There is no stage field. A note is held while it has no off time, or while
time_on > time_off (a retriggered note whose stale off time predates its on
time). Otherwise it is released.

  held:      life = t - time_on
             life <= A            level = life / A * start
             life <= A + D        level = start + (life - A) / D * (sust - start)
             otherwise            level = sust

  released:  rel_life = time_off - time_on          (fixed, independent of t)
             from     = held curve evaluated at rel_life
             level    = from - (t - time_off) / R * from

Release starts from whatever level the note had reached when the key came up,
including a partial attack. Releasing halfway through a 10ms attack starts the
release ramp at 0.5 * start, not at start. This keeps the output continuous
across the key-up instant.

Negative levels (t past the end of the release ramp) clamp to 0.
*/

/// Shape of a linear ADSR envelope.
///
/// Construct with [`EnvelopeParams::new`], which rejects non-positive time
/// constants so the amplitude formula never divides by zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawEnvelopeParams"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    attack_time: f32,       // seconds to ramp 0 -> start
    decay_time: f32,        // seconds to ramp start -> sustain
    release_time: f32,      // seconds to ramp current -> 0
    start_amplitude: f32,   // peak reached at the end of attack
    sustain_amplitude: f32, // level held while the key is down
}

impl EnvelopeParams {
    pub fn new(
        attack_time: f32,
        decay_time: f32,
        release_time: f32,
        start_amplitude: f32,
        sustain_amplitude: f32,
    ) -> Result<Self> {
        positive_time("attack_time", attack_time)?;
        positive_time("decay_time", decay_time)?;
        positive_time("release_time", release_time)?;
        unit_amplitude("start_amplitude", start_amplitude)?;
        unit_amplitude("sustain_amplitude", sustain_amplitude)?;

        Ok(Self {
            attack_time,
            decay_time,
            release_time,
            start_amplitude,
            sustain_amplitude,
        })
    }

    /// Amplitude at time `t` for a note struck at `time_on` and released at
    /// `time_off` (`None` while held). Never negative.
    pub fn amplitude(&self, t: f64, time_on: f64, time_off: Option<f64>) -> f32 {
        if t < time_on {
            return 0.0;
        }

        let amplitude = match time_off {
            Some(off) if time_on <= off => {
                let release_start = self.held_amplitude((off - time_on) as f32);
                let progress = (t - off) as f32 / self.release_time;
                release_start - progress * release_start
            }
            _ => self.held_amplitude((t - time_on) as f32),
        };

        amplitude.max(0.0)
    }

    /// The attack/decay/sustain curve for a key held for `life` seconds.
    pub fn held_amplitude(&self, life: f32) -> f32 {
        if life <= self.attack_time {
            (life / self.attack_time) * self.start_amplitude
        } else if life <= self.attack_time + self.decay_time {
            let progress = (life - self.attack_time) / self.decay_time;
            self.start_amplitude + progress * (self.sustain_amplitude - self.start_amplitude)
        } else {
            self.sustain_amplitude
        }
    }

    /// Instant at which a note released at `time_off` falls silent.
    pub fn release_end(&self, time_off: f64) -> f64 {
        time_off + self.release_time as f64
    }

    pub fn attack_time(&self) -> f32 {
        self.attack_time
    }

    pub fn decay_time(&self) -> f32 {
        self.decay_time
    }

    pub fn release_time(&self) -> f32 {
        self.release_time
    }

    pub fn start_amplitude(&self) -> f32 {
        self.start_amplitude
    }

    pub fn sustain_amplitude(&self) -> f32 {
        self.sustain_amplitude
    }
}

/// Unvalidated envelope as it appears in serialized config.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawEnvelopeParams {
    attack_time: f32,
    decay_time: f32,
    release_time: f32,
    start_amplitude: f32,
    sustain_amplitude: f32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawEnvelopeParams> for EnvelopeParams {
    type Error = Error;

    fn try_from(raw: RawEnvelopeParams) -> Result<Self> {
        Self::new(
            raw.attack_time,
            raw.decay_time,
            raw.release_time,
            raw.start_amplitude,
            raw.sustain_amplitude,
        )
    }
}

fn positive_time(parameter: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidEnvelope { parameter, value })
    }
}

fn unit_amplitude(parameter: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidEnvelope { parameter, value })
    }
}
