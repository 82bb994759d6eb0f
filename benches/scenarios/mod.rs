//! Real-world benchmark scenarios.
//!
//! These exercise the registry and renderer the way the audio callback does.

mod render;

pub use render::bench_render;
