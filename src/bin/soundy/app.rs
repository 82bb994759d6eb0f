//! Soundy - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use rtrb::RingBuffer;
use std::io::stdout;

use super::ui::UiApp;

use soundy::{
    instruments::{InstrumentBank, InstrumentKind},
    io::open_output,
    synth::Synth,
    EngineConfig,
};

/// Capacity of the audio -> UI scope ring
const SCOPE_RING_LEN: usize = 8192;

/// Gate timeout used when the terminal cannot report key releases
const FALLBACK_GATE: f64 = 0.3;

/// Main application builder
pub struct Soundy {
    config: EngineConfig,
    instrument: InstrumentKind,
}

impl Soundy {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            instrument: InstrumentKind::Bell,
        }
    }

    /// Instrument played on startup
    pub fn instrument(mut self, instrument: InstrumentKind) -> Self {
        self.instrument = instrument;
        self
    }

    /// Open audio, take over the terminal, play until the user quits
    pub fn run(self) -> EyreResult<()> {
        let mut config = self.config;

        // Key release events need the kitty keyboard protocol
        let key_release = supports_keyboard_enhancement().unwrap_or(false);
        if !key_release && config.gate_timeout.is_none() {
            log::warn!(
                "terminal does not report key releases, notes release after {FALLBACK_GATE}s"
            );
            config.gate_timeout = Some(FALLBACK_GATE);
        }

        let bank = InstrumentBank::standard().wrap_err("failed to build instruments")?;
        let start = bank
            .find(self.instrument)
            .ok_or_else(|| eyre!("no {} in instrument bank", self.instrument))?;

        let (mut controller, renderer) = Synth::new(config.clone(), bank)?
            .instrument(start)
            .into_parts();

        // Fail before touching the terminal if there's no usable device
        let (scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_RING_LEN);
        let output = open_output(&config, renderer.with_scope(scope_tx))
            .wrap_err("failed to open audio output")?;

        let mut terminal = ratatui::init();
        let mut ui = UiApp::new(
            scope_rx,
            output.device_name().to_string(),
            output.config().sample_rate.0,
            config.gate_timeout,
            config.amplitude,
        );
        let res = (|| -> EyreResult<()> {
            if key_release {
                execute!(
                    stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
            }
            ui.run(&mut terminal, &mut controller, config.tick_interval())
        })();

        if let Err(err) = output.pause() {
            log::warn!("{err}");
        }
        if key_release {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        ratatui::restore();
        drop(output);

        res
    }
}

impl Default for Soundy {
    fn default() -> Self {
        Self::new()
    }
}
