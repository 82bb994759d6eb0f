//! Error types for soundy.

use thiserror::Error;

/// Result type alias for soundy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while composing or running the synthesizer.
#[derive(Debug, Error)]
pub enum Error {
    /// An envelope parameter is out of range (time constants must be > 0,
    /// amplitudes must lie in 0..=1).
    #[error("invalid envelope parameter `{parameter}`: {value}")]
    InvalidEnvelope { parameter: &'static str, value: f32 },

    /// Instrument gain must be finite and non-negative.
    #[error("invalid instrument volume: {0}")]
    InvalidVolume(f32),

    /// Invalid engine configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The instrument bank must hold at least one instrument.
    #[error("instrument bank is empty")]
    EmptyBank,

    /// No audio output device is available on the default host.
    #[error("no default output device available")]
    NoOutputDevice,

    /// The device offers no config matching the requested stream.
    #[error("output device does not support {channels} channel(s) of i16 at {sample_rate} Hz")]
    UnsupportedFormat { sample_rate: u32, channels: u16 },

    /// Querying the device's supported configs failed.
    #[error("failed to query output configs: {0}")]
    SupportedConfigs(#[from] cpal::SupportedStreamConfigsError),

    /// The backend refused to build the output stream.
    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    /// The backend refused to start the output stream.
    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    /// The backend could not pause the output stream.
    #[error("failed to pause output stream: {0}")]
    PauseStream(#[from] cpal::PauseStreamError),
}
