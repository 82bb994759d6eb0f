//! Benchmarks for the time-pure ADSR envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use soundy::dsp::EnvelopeParams;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let env = EnvelopeParams::new(0.1, 0.1, 0.3, 1.0, 0.7).unwrap();

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // (label, start of block, time_on, time_off)
        let phases = [
            ("attack", 0.0, 0.0, None),
            ("sustain", 1.0, 0.0, None),
            ("release", 1.05, 0.0, Some(1.0)),
        ];

        for (label, start, time_on, time_off) in phases {
            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                b.iter(|| {
                    for (n, sample) in buffer.iter_mut().enumerate() {
                        let t = start + n as f64 / SAMPLE_RATE;
                        *sample = env.amplitude(black_box(t), time_on, time_off);
                    }
                })
            });
        }
    }

    group.finish();
}
