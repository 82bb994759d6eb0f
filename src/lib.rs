pub mod config;
pub mod dsp;
pub mod error;
pub mod instruments; // Bell, Harmonica, PureSaw recipes
pub mod io;
pub mod synth; // Note registry and the realtime render loop

pub use config::EngineConfig;
pub use error::{Error, Result};

/// Largest block rendered in one go when the device hands over interleaved
/// multi-channel buffers.
pub const MAX_BLOCK_SIZE: usize = 2048;
