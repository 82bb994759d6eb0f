//! Output scope with level guides
//!
//! Dotted guides at +/- one note's full-envelope level show how much of the
//! mix headroom a chord is using. The title turns red once the summed output
//! hits the i16 rail.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Normalized level at which the i16 conversion has saturated
const CLIP_LEVEL: f32 = 0.999;

/// Render the most recent output samples, normalized to full scale.
///
/// `note_level` is the normalized peak of a single note at full envelope.
pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32], note_level: f64) {
    let peak = audio_buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
    let clipping = peak >= CLIP_LEVEL;
    let title = format!(
        " Output  {:+.1} dBFS{} ",
        20.0 * peak.max(1e-5).log10(),
        if clipping { "  CLIP" } else { "" }
    );
    let title_style = Style::default().fg(if clipping { Color::Red } else { Color::White });
    let block = Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL);

    let len = audio_buffer.len().max(1) as f64;
    let data: Vec<(f64, f64)> = audio_buffer
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / len, sample as f64))
        .collect();
    let upper = guide(note_level);
    let lower = guide(-note_level);

    let guide_style = Style::default().fg(Color::DarkGray);
    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(guide_style)
            .data(&upper),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(guide_style)
            .data(&lower),
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(if clipping { Color::Red } else { Color::Cyan }))
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(Axis::default().bounds([0.0, 1.0]).style(guide_style))
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .labels(["-1", "0", "+1"])
                .style(guide_style),
        );

    frame.render_widget(chart, area);
}

/// Sparse horizontal line at `level`
fn guide(level: f64) -> Vec<(f64, f64)> {
    (0..=32).map(|i| (i as f64 / 32.0, level)).collect()
}
