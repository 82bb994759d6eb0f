//! Benchmarks for the full render callback.
//!
//! Each case fills the registry with a chord and renders one block, the same
//! work the audio thread does per callback.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use soundy::{
    instruments::{InstrumentBank, InstrumentKind},
    synth::Synth,
    EngineConfig,
};

use crate::BLOCK_SIZES;

/// Notes held at once in each scenario
const CHORD_SIZES: &[usize] = &[1, 4, 13];

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");

    for kind in InstrumentKind::ALL {
        for &notes in CHORD_SIZES {
            for &size in BLOCK_SIZES {
                let bank = InstrumentBank::standard().unwrap();
                let id = bank.find(kind).unwrap();
                let (mut controller, mut renderer) = Synth::new(EngineConfig::default(), bank)
                    .unwrap()
                    .instrument(id)
                    .into_parts();

                let keys: Vec<_> = controller
                    .keymap()
                    .iter()
                    .take(notes)
                    .map(|(key, _)| soundy::synth::InputEvent::KeyDown { key, repeat: false })
                    .collect();
                controller.tick(keys);

                // Held bells fade out after a second of iterations, so their
                // numbers mostly measure the silent-note early out
                let mut buffer = vec![0i16; size];
                let label = format!("{}/{}", kind.name(), notes);
                group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                    b.iter(|| renderer.render(black_box(&mut buffer)))
                });
            }
        }
    }

    group.finish();
}
