//! Benchmarks for DSP primitives and the full render loop.
//!
//! Run with: cargo bench
//!
//! Reference timing at 44.1kHz sample rate:
//!   - 64 samples  = 1.45ms deadline
//!   - 128 samples = 2.90ms deadline
//!   - 256 samples = 5.80ms deadline
//!   - 512 samples = 11.61ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Envelope and oscillator evaluation
//!   - scenarios/*  Registry + renderer with realistic polyphony

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

/// Sample rate used by every benchmark.
pub const SAMPLE_RATE: f64 = 44_100.0;

criterion_group!(
    benches,
    dsp::bench_envelope,
    dsp::bench_oscillator,
    scenarios::bench_render,
);
criterion_main!(benches);
