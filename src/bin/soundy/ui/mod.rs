//! TUI module for soundy
//!
//! Doubles as the input thread: each frame gathers key events for one tick,
//! hands them to the controller, then redraws.

mod keyboard;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;
use std::time::{Duration, Instant};

use soundy::synth::{Controller, InputEvent, TickReport};

use keyboard::render_keyboard;
use status::{render_status, AudioStats, StatusInfo};
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;

/// UI application state
pub struct UiApp {
    /// Ring buffer receiver for rendered samples
    scope_rx: Consumer<f32>,
    /// Audio sample buffer for visualization
    audio_buffer: Vec<f32>,
    device_name: String,
    sample_rate: u32,
    gate_timeout: Option<f64>,
    /// Normalized peak of one note at full envelope
    note_level: f64,
    /// Key events gathered during the current tick
    pending: Vec<InputEvent>,
    last_report: TickReport,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        scope_rx: Consumer<f32>,
        device_name: String,
        sample_rate: u32,
        gate_timeout: Option<f64>,
        amplitude: i16,
    ) -> Self {
        Self {
            scope_rx,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            device_name,
            sample_rate,
            gate_timeout,
            note_level: (amplitude as f64 / 4.0) / i16::MAX as f64,
            pending: Vec::with_capacity(16),
            last_report: TickReport::default(),
            should_quit: false,
        }
    }

    /// Run the input/UI loop until the user quits
    pub fn run(
        &mut self,
        terminal: &mut DefaultTerminal,
        controller: &mut Controller,
        tick: Duration,
    ) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_input(controller, tick)?;

            // One lock per tick: apply presses/releases, then prune.
            // Without key-release reporting auto-repeat arrives as plain
            // presses; the controller's gate mode folds those into the held note
            self.last_report = controller.tick(self.pending.drain(..));

            self.poll_audio();
            terminal.draw(|frame| self.render(frame, controller))?;
        }

        controller.release_all();
        Ok(())
    }

    /// Collect key events until the tick deadline passes
    fn poll_input(&mut self, controller: &mut Controller, tick: Duration) -> EyreResult<()> {
        let deadline = Instant::now() + tick;
        while let Some(timeout) = deadline.checked_duration_since(Instant::now()) {
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, controller);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, controller: &mut Controller) {
        let pressed = key.kind == KeyEventKind::Press;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') if pressed => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if pressed && key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char(digit @ '1'..='9') => {
                if pressed {
                    let index = digit as usize - '1' as usize;
                    if let Some(id) = controller.instruments().id(index) {
                        controller.select_instrument(id);
                    }
                }
            }
            KeyCode::Char(key_char) => self.pending.push(match key.kind {
                KeyEventKind::Press => InputEvent::KeyDown {
                    key: key_char,
                    repeat: false,
                },
                KeyEventKind::Repeat => InputEvent::KeyDown {
                    key: key_char,
                    repeat: true,
                },
                KeyEventKind::Release => InputEvent::KeyUp { key: key_char },
            }),
            _ => {}
        }
    }

    /// Poll for new audio samples from ring buffer
    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.scope_rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }

        // Keep only the most recent VIS_BUFFER_SIZE samples
        if received && self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    fn render(&self, frame: &mut Frame, controller: &Controller) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Length(5), // Keyboard
                Constraint::Min(8),    // Waveform
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let info = StatusInfo {
            instrument: controller.instrument().kind(),
            device_name: &self.device_name,
            sample_rate: self.sample_rate,
            seconds: controller.now(),
            live_notes: self.last_report.live,
            gate_timeout: self.gate_timeout,
            dropouts: self.last_report.dropouts,
        };
        render_status(frame, chunks[0], &info, &AudioStats::from_buffer(&self.audio_buffer));

        render_keyboard(frame, chunks[1], controller.keymap(), &self.last_report.held);

        render_waveform(frame, chunks[2], &self.audio_buffer, self.note_level);

        let instruments: String = controller
            .instruments()
            .iter()
            .take(9)
            .map(|(id, instrument)| format!("[{}] {}  ", id.index() + 1, instrument.kind()))
            .collect();
        let help = Paragraph::new(format!(" [Z..,] Play  {instruments}[Esc/Q] Quit"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
