#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Engine settings shared by the audio stream and the input loop.
///
/// Defaults match the classic setup: 44.1 kHz mono i16 in 512-sample frames,
/// input polled 30 times a second.
///
/// ```
/// use soundy::EngineConfig;
///
/// let config = EngineConfig::default().tick_rate(60).gate_timeout(Some(0.3));
/// assert!(config.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: u32,
    pub channels: u16,
    /// Samples per callback requested from the backend.
    pub frame_size: u32,
    /// Full-scale output level; each note is mixed in at a quarter of it.
    pub amplitude: i16,
    /// Input polls per second.
    pub tick_rate: u32,
    /// Initial registry capacity. Not a limit.
    pub note_capacity: usize,
    /// Seconds after which a held key is released automatically.
    pub gate_timeout: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 1,
            frame_size: 512,
            amplitude: 20_000,
            tick_rate: 30,
            note_capacity: 64,
            gate_timeout: None,
        }
    }
}

impl EngineConfig {
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn channels(mut self, channels: u16) -> Self {
        self.channels = channels;
        self
    }

    pub fn frame_size(mut self, frame_size: u32) -> Self {
        self.frame_size = frame_size;
        self
    }

    pub fn amplitude(mut self, amplitude: i16) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn gate_timeout(mut self, seconds: Option<f64>) -> Self {
        self.gate_timeout = seconds;
        self
    }

    /// Interval between input polls.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidConfig("sample_rate must be non-zero".into()));
        }
        if self.channels == 0 {
            return Err(Error::InvalidConfig("channels must be non-zero".into()));
        }
        if self.frame_size == 0 {
            return Err(Error::InvalidConfig("frame_size must be non-zero".into()));
        }
        if self.amplitude <= 0 {
            return Err(Error::InvalidConfig("amplitude must be positive".into()));
        }
        if self.tick_rate == 0 {
            return Err(Error::InvalidConfig("tick_rate must be non-zero".into()));
        }
        if let Some(timeout) = self.gate_timeout {
            if !timeout.is_finite() || timeout < 0.0 {
                return Err(Error::InvalidConfig(format!("gate_timeout {timeout} must be >= 0")));
            }
        }
        Ok(())
    }
}
