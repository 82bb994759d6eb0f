//! Built-in instruments.
//!
//! An instrument is an immutable recipe: an envelope, a gain, and a fixed mix
//! of oscillator calls. It holds no per-note state, so one instrument serves
//! every note that references it.
//!
//! # Example
//!
//! ```
//! use rand::{rngs::SmallRng, SeedableRng};
//! use soundy::instruments::Instrument;
//!
//! let mut noise = SmallRng::seed_from_u64(7);
//! let bell = Instrument::bell()?;
//! let sound = bell.sound(440.0, 0.005, 0.0, None, &mut noise);
//! assert!(sound.alive);
//! # Ok::<(), soundy::Error>(())
//! ```

mod bank;
mod bell;
mod harmonica;
mod pure_saw;

use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    dsp::EnvelopeParams,
    error::{Error, Result},
};

pub use bank::{InstrumentBank, InstrumentId};

/// Which mixing recipe an instrument plays.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    Bell,
    Harmonica,
    PureSaw,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 3] = [Self::Bell, Self::Harmonica, Self::PureSaw];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bell => "bell",
            Self::Harmonica => "harmonica",
            Self::PureSaw => "saw",
        }
    }

    /// The recipe's raw oscillator mix, before volume and envelope.
    fn mix<R: Rng + ?Sized>(self, freq: f32, t: f64, rng: &mut R) -> f32 {
        match self {
            Self::Bell => bell::mix(freq, t, rng),
            Self::Harmonica => harmonica::mix(freq, t, rng),
            Self::PureSaw => pure_saw::mix(freq, t, rng),
        }
    }

    fn default_volume(self) -> f32 {
        match self {
            Self::Bell => bell::VOLUME,
            Self::Harmonica => harmonica::VOLUME,
            Self::PureSaw => pure_saw::VOLUME,
        }
    }

    fn default_envelope(self) -> Result<EnvelopeParams> {
        match self {
            Self::Bell => bell::envelope(),
            Self::Harmonica => harmonica::envelope(),
            Self::PureSaw => pure_saw::envelope(),
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InstrumentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bell" => Ok(Self::Bell),
            "harmonica" => Ok(Self::Harmonica),
            "saw" | "puresaw" | "pure_saw" => Ok(Self::PureSaw),
            other => Err(Error::InvalidConfig(format!("unknown instrument `{other}`"))),
        }
    }
}

/// One instrument sample plus whether the note is still audible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sound {
    pub value: f32,
    pub alive: bool,
}

impl Sound {
    pub const SILENT: Self = Self {
        value: 0.0,
        alive: false,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    kind: InstrumentKind,
    volume: f32,
    envelope: EnvelopeParams,
}

impl Instrument {
    /// Build an instrument from a recipe with a custom gain and envelope.
    pub fn new(kind: InstrumentKind, volume: f32, envelope: EnvelopeParams) -> Result<Self> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(Error::InvalidVolume(volume));
        }

        Ok(Self {
            kind,
            volume,
            envelope,
        })
    }

    /// The recipe with its stock gain and envelope.
    pub fn preset(kind: InstrumentKind) -> Result<Self> {
        Self::new(kind, kind.default_volume(), kind.default_envelope()?)
    }

    pub fn bell() -> Result<Self> {
        Self::preset(InstrumentKind::Bell)
    }

    pub fn harmonica() -> Result<Self> {
        Self::preset(InstrumentKind::Harmonica)
    }

    pub fn pure_saw() -> Result<Self> {
        Self::preset(InstrumentKind::PureSaw)
    }

    /// Render one sample of a note at `freq` Hz.
    ///
    /// `alive` is false once the envelope has reached zero; the note can then
    /// be dropped by the next prune. `rng` feeds any noise partials.
    #[inline]
    pub fn sound<R: Rng + ?Sized>(
        &self,
        freq: f32,
        t: f64,
        time_on: f64,
        time_off: Option<f64>,
        rng: &mut R,
    ) -> Sound {
        let amplitude = self.envelope.amplitude(t, time_on, time_off);
        if amplitude <= 0.0 {
            return Sound::SILENT;
        }

        Sound {
            value: self.volume * amplitude * self.kind.mix(freq, t, rng),
            alive: true,
        }
    }

    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn envelope(&self) -> &EnvelopeParams {
        &self.envelope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::SmallRng, SeedableRng};
    use std::f64::consts::{FRAC_2_PI, TAU};

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(11)
    }

    #[test]
    fn presets_build() {
        for kind in InstrumentKind::ALL {
            let instrument = Instrument::preset(kind).unwrap();
            assert_eq!(instrument.kind(), kind);
        }
        assert_abs_diff_eq!(Instrument::pure_saw().unwrap().volume(), 0.8);
    }

    #[test]
    fn rejects_bad_volume() {
        let envelope = EnvelopeParams::new(0.1, 0.1, 0.1, 1.0, 0.5).unwrap();
        assert!(matches!(
            Instrument::new(InstrumentKind::Bell, -1.0, envelope),
            Err(Error::InvalidVolume(_))
        ));
        assert!(Instrument::new(InstrumentKind::Bell, f32::INFINITY, envelope).is_err());
    }

    #[test]
    fn alive_tracks_envelope() {
        let bell = Instrument::bell().unwrap();
        let mut rng = rng();
        assert!(bell.sound(440.0, 0.5, 0.0, None, &mut rng).alive);
        assert!(bell.sound(440.0, 0.5, 0.0, Some(0.2), &mut rng).alive);
        assert_eq!(bell.sound(440.0, 2.0, 0.0, Some(0.2), &mut rng), Sound::SILENT);
    }

    #[test]
    fn sound_is_mix_scaled_by_envelope() {
        let saw = Instrument::pure_saw().unwrap();
        let t = 0.003f64;
        // 30% of the way through a 10ms attack
        let amplitude = 0.3;
        let phase = TAU * 220.0 * t + 0.001 * 220.0 * (TAU * 5.0 * t).sin();
        let partials: f64 = (1..=39).map(|k| (k as f64 * phase).sin() / k as f64).sum();
        let expected = 0.8 * amplitude * (partials * FRAC_2_PI) as f32;
        let sound = saw.sound(220.0, t, 0.0, None, &mut rng());
        assert_abs_diff_eq!(sound.value, expected, epsilon = 1e-4);
    }

    #[test]
    fn parses_names() {
        assert_eq!("Bell".parse::<InstrumentKind>().unwrap(), InstrumentKind::Bell);
        assert_eq!(" harmonica ".parse::<InstrumentKind>().unwrap(), InstrumentKind::Harmonica);
        assert_eq!("puresaw".parse::<InstrumentKind>().unwrap(), InstrumentKind::PureSaw);
        assert!("tuba".parse::<InstrumentKind>().is_err());
        for kind in InstrumentKind::ALL {
            assert_eq!(kind.to_string().parse::<InstrumentKind>().unwrap(), kind);
        }
    }
}
