//! Status bar: octave, volume, output device and level meters.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::StatusView;
use crate::app::NoticeLevel;

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

pub fn render_status(frame: &mut Frame, area: Rect, view: &StatusView<'_>) {
    let block = Block::default().title(" saavy piano ").borders(Borders::ALL);

    let mut spans = vec![
        Span::styled(
            format!(" Octave {:+}  ", view.octave_shift),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Volume {:>3.0}%  ", view.volume * 100.0),
            Style::default().fg(Color::White),
        ),
    ];

    match view.output {
        Some(output) => spans.push(Span::styled(
            format!(
                "{} {:.1}kHz  ",
                output.device_name,
                output.sample_rate / 1000.0
            ),
            Style::default().fg(Color::DarkGray),
        )),
        None => spans.push(Span::styled(
            "silent  ",
            Style::default().fg(Color::Yellow),
        )),
    }

    if view.timed_release {
        spans.push(Span::styled(
            "auto-release  ",
            Style::default().fg(Color::DarkGray),
        ));
    }

    spans.push(Span::styled(
        format!("Peak: {:.2}  RMS: {:.2}  ", view.stats.peak, view.stats.rms),
        Style::default().fg(Color::Magenta),
    ));

    if let Some(notice) = view.notice {
        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
        };
        spans.push(Span::styled(notice.text.clone(), Style::default().fg(color)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
