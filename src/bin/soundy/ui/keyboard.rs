//! Keyboard widget - the mapped keys with held notes lit

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use soundy::io::KeyMap;

/// Semitone names counting up from A
const NOTE_NAMES: [&str; 12] = ["A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#"];

/// Name of the note `id` semitones above A3, e.g. "C#4"
fn note_name(id: u8) -> String {
    let id = id as usize;
    // Octave numbers roll over at C, three semitones above A
    let octave = 3 + (id + 9) / 12;
    format!("{}{}", NOTE_NAMES[id % 12], octave)
}

pub fn render_keyboard(frame: &mut Frame, area: Rect, keymap: &KeyMap, held: &[u8]) {
    let block = Block::default().title(" Keys ").borders(Borders::ALL);

    let mut keys = Vec::with_capacity(keymap.len());
    let mut names = Vec::with_capacity(keymap.len());

    for (key, template) in keymap.iter() {
        let is_held = held.contains(&template.id);
        let sharp = NOTE_NAMES[template.id as usize % 12].ends_with('#');

        let style = match (is_held, sharp) {
            (true, _) => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::Gray).bg(Color::DarkGray),
            (false, false) => Style::default().fg(Color::Black).bg(Color::White),
        };

        keys.push(Span::styled(format!(" {:^3} ", key.to_ascii_uppercase()), style));
        names.push(Span::styled(
            format!(" {:^3} ", note_name(template.id)),
            Style::default().fg(if is_held { Color::Cyan } else { Color::DarkGray }),
        ));
    }

    let paragraph = Paragraph::new(vec![Line::from(keys), Line::from(names)]).block(block);
    frame.render_widget(paragraph, area);
}
