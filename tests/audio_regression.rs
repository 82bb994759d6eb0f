use std::sync::Arc;

use approx::assert_abs_diff_eq;
use soundy::{
    instruments::{Instrument, InstrumentBank, InstrumentKind},
    io::KeyMap,
    synth::{AudioRenderer, Controller, InputEvent, NoteRegistry, SampleClock, SharedRegistry, Synth},
    EngineConfig,
};

const LOW_A: char = 'z';

fn down(key: char) -> InputEvent {
    InputEvent::KeyDown { key, repeat: false }
}

fn up(key: char) -> InputEvent {
    InputEvent::KeyUp { key }
}

/// Controller and renderer over a registry the test can inspect.
fn rig(sample_rate: u32, kind: InstrumentKind) -> (Controller, AudioRenderer, SharedRegistry) {
    let bank = Arc::new(InstrumentBank::standard().unwrap());
    let instrument = bank.find(kind).unwrap();
    let registry = NoteRegistry::shared(16);
    let clock = SampleClock::new(sample_rate);
    let renderer = AudioRenderer::new(registry.clone(), bank.clone(), clock.clone(), 20_000);
    let controller = Controller::new(registry.clone(), bank, clock, KeyMap::chromatic(), instrument);
    (controller, renderer, registry)
}

#[test]
fn renders_silence_with_empty_registry() {
    let bank = InstrumentBank::standard().unwrap();
    let (_, mut renderer) = Synth::new(EngineConfig::default(), bank).unwrap().into_parts();

    for len in [1, 512, 1000] {
        let mut out = vec![-1i16; len];
        renderer.render(&mut out);
        assert_eq!(out.len(), len);
        assert!(out.iter().all(|&s| s == 0));
    }
    assert_eq!(renderer.clock().samples(), 1513);
}

#[test]
fn release_mid_attack_keeps_partial_level() {
    // 1 kHz clock so 5 samples land exactly on t = 0.005
    let (mut controller, mut renderer, registry) = rig(1_000, InstrumentKind::Bell);

    controller.tick([down(LOW_A)]);
    let mut out = [0i16; 5];
    renderer.render(&mut out);
    controller.tick([up(LOW_A)]);

    let note = registry.lock().notes()[0];
    assert_abs_diff_eq!(note.frequency, 220.0, epsilon = 1e-3);
    assert_eq!(note.time_on, 0.0);
    assert_eq!(note.time_off, Some(0.005));

    let bell = Instrument::bell().unwrap();
    let envelope = bell.envelope();
    let after = envelope.amplitude(0.005 + 1e-6, note.time_on, note.time_off);
    assert_abs_diff_eq!(after, 0.5 * envelope.start_amplitude(), epsilon = 1e-3);
}

#[test]
fn duplicate_presses_release_and_prune_together() {
    let (mut controller, mut renderer, registry) = rig(1_000, InstrumentKind::PureSaw);

    let report = controller.tick([down(LOW_A), down(LOW_A)]);
    assert_eq!(report.added, 2);
    assert_eq!(report.held, vec![0]);

    let mut out = [0i16; 50];
    renderer.render(&mut out);
    assert!(out.iter().any(|&s| s != 0));

    let report = controller.tick([up(LOW_A)]);
    assert_eq!(report.released, 2);
    assert!(registry.lock().iter().all(|note| note.time_off == Some(0.05)));

    // PureSaw releases in 10ms; render well past it
    renderer.render(&mut out);
    assert!(registry.lock().iter().all(|note| !note.active));

    let report = controller.tick(std::iter::empty());
    assert_eq!(report.pruned, 2);
    assert_eq!(report.live, 0);
}

#[test]
fn held_note_survives_prune_cycles() {
    let (mut controller, mut renderer, _) = rig(44_100, InstrumentKind::Harmonica);
    controller.tick([down('c')]);

    let mut out = vec![0i16; 512];
    for _ in 0..20 {
        renderer.render(&mut out);
        let report = controller.tick(std::iter::empty());
        assert_eq!(report.live, 1);
        assert_eq!(report.pruned, 0);
    }
    assert!(out.iter().any(|&s| s != 0));
}

#[test]
fn input_thread_and_renderer_run_concurrently() {
    let (mut controller, mut renderer, registry) = rig(44_100, InstrumentKind::Bell);

    let audio = std::thread::spawn(move || {
        let mut out = vec![0i16; 512];
        let mut produced = 0usize;
        for _ in 0..200 {
            renderer.render(&mut out);
            produced += out.len();
        }
        (produced, renderer.clock().samples())
    });

    let keys: Vec<char> = KeyMap::chromatic().iter().map(|(key, _)| key).collect();
    for round in 0..50 {
        let key = keys[round % keys.len()];
        controller.tick([down(key)]);
        controller.tick([up(key)]);
    }

    let (produced, clock) = audio.join().unwrap();
    assert_eq!(produced, 200 * 512);
    assert_eq!(clock, produced as u64);
    assert!(registry.lock().iter().all(|note| !note.is_held()));
}
