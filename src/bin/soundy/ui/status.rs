//! Status bar widget - instrument, clock, note count and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use soundy::instruments::InstrumentKind;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Everything the status line shows besides audio levels
pub struct StatusInfo<'a> {
    pub instrument: InstrumentKind,
    pub device_name: &'a str,
    pub sample_rate: u32,
    pub seconds: f64,
    pub live_notes: usize,
    pub gate_timeout: Option<f64>,
    /// Blocks the renderer left silent on lock contention
    pub dropouts: u64,
}

pub fn render_status(frame: &mut Frame, area: Rect, info: &StatusInfo, stats: &AudioStats) {
    let block = Block::default().title(" soundy ").borders(Borders::ALL);

    let release_mode = match info.gate_timeout {
        Some(gate) => format!("gate {gate:.2}s"),
        None => "key release".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {}  ", info.instrument.name().to_uppercase()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Notes: {:<3} ", info.live_notes),
            Style::default().fg(if info.live_notes > 0 {
                Color::Green
            } else {
                Color::DarkGray
            }),
        ),
        Span::styled(
            format!("{:>8.2}s  ", info.seconds),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "{} @ {:.1}kHz  {}  ",
                info.device_name,
                info.sample_rate as f32 / 1000.0,
                release_mode
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}  ", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!("Dropouts: {}", info.dropouts),
            Style::default().fg(if info.dropouts > 0 {
                Color::Yellow
            } else {
                Color::DarkGray
            }),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
