//! On-screen keyboard: key labels with held notes lit.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_piano::{input::key_label, Note};

/// Columns per white key. Black keys sit on the boundary to the right.
const KEY_WIDTH: usize = 4;

struct WhiteKey {
    note: Note,
    sharp: Option<Note>,
}

fn layout() -> Vec<WhiteKey> {
    let mut keys: Vec<WhiteKey> = Vec::new();
    for &note in Note::keyboard() {
        if note.pitch.is_sharp() {
            if let Some(last) = keys.last_mut() {
                last.sharp = Some(note);
            }
        } else {
            keys.push(WhiteKey { note, sharp: None });
        }
    }
    keys
}

fn key_style(held: bool, base: Color) -> Style {
    if held {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(base)
    }
}

pub fn render_keyboard(frame: &mut Frame, area: Rect, held: &[Note], octave_shift: i8) {
    let block = Block::default().title(" Keyboard ").borders(Borders::ALL);

    let mut black_row = Vec::new();
    let mut white_row = Vec::new();
    let mut name_row = Vec::new();

    for key in layout() {
        let white_held = held.contains(&key.note);
        let label = key_label(key.note).unwrap_or(' ');
        white_row.push(Span::raw(" "));
        white_row.push(Span::styled(label.to_string(), key_style(white_held, Color::White)));
        white_row.push(Span::raw("  "));

        name_row.push(Span::styled(
            format!("{:<width$}", key.note.shifted(octave_shift).to_string(), width = KEY_WIDTH),
            key_style(white_held, Color::DarkGray),
        ));

        black_row.push(Span::raw("   "));
        match key.sharp {
            Some(sharp) => {
                let label = key_label(sharp).unwrap_or(' ');
                black_row.push(Span::styled(
                    label.to_string(),
                    key_style(held.contains(&sharp), Color::Yellow),
                ));
            }
            None => black_row.push(Span::raw(" ")),
        }
    }

    let lines = vec![
        Line::from(black_row),
        Line::from(white_row),
        Line::from(name_row),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
