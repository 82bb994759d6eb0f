//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use rand::{rngs::SmallRng, SeedableRng};
use soundy::dsp::{wave, PhaseModulation, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let mut rng = SmallRng::seed_from_u64(42);

    let waveforms = [
        ("sine", Waveform::Sine),         // one sin()
        ("square", Waveform::Square),     // sin() plus a branch
        ("triangle", Waveform::Triangle), // sin() then asin()
        ("saw", Waveform::Saw),           // 39 partials - the expensive one
        ("noise", Waveform::Noise),       // one SmallRng draw
    ];

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (label, waveform) in waveforms {
            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                b.iter(|| {
                    for (n, sample) in buffer.iter_mut().enumerate() {
                        let t = n as f64 / SAMPLE_RATE;
                        *sample = wave(waveform, black_box(t), 440.0, PhaseModulation::VIBRATO, &mut rng);
                    }
                })
            });
        }
    }

    group.finish();
}
