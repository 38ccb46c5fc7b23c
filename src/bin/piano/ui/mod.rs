//! Terminal view: status bar, keyboard, scope and help line.

mod keyboard;
mod status;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use saavy_piano::Note;

use super::{app::Notice, audio::AudioOutput};

pub use status::AudioStats;

use keyboard::render_keyboard;
use status::render_status;
use waveform::render_waveform;

/// Everything the view needs for one frame.
pub struct StatusView<'a> {
    pub octave_shift: i8,
    pub volume: f32,
    pub held: Vec<Note>,
    pub output: Option<&'a AudioOutput>,
    pub notice: Option<&'a Notice>,
    pub stats: AudioStats,
    pub timed_release: bool,
}

pub fn render(frame: &mut Frame, view: &StatusView<'_>, scope: &[f32]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Length(6), // Keyboard
            Constraint::Min(6),    // Scope
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_status(frame, chunks[0], view);
    render_keyboard(frame, chunks[1], &view.held, view.octave_shift);
    render_waveform(frame, chunks[2], scope);

    let help = Paragraph::new(
        " [Z..P] White keys  [S..0] Black keys  [↑/↓] Octave  [-/=] Volume  [Esc] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}
