//! Terminal event loop: keys in, notes out.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use rtrb::Consumer;
use tracing::debug;

use saavy_piano::{
    input::{InputDispatcher, InputOutcome},
    synth::RingSink,
    Note, Piano,
};

use super::audio::AudioOutput;
use super::ui::{self, AudioStats, StatusView};

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 1024;
/// How long a notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(3);
const VOLUME_STEP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    shown_at: Instant,
}

impl Notice {
    fn new(text: impl Into<String>, level: NoticeLevel) -> Self {
        Self {
            text: text.into(),
            level,
            shown_at: Instant::now(),
        }
    }
}

/// How key releases are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    /// The terminal reports press, repeat and release separately.
    Reported,
    /// Only presses arrive; each note is released after a fixed hold.
    Timed(Duration),
}

pub struct App {
    piano: Piano<RingSink>,
    input: InputDispatcher,
    release_mode: ReleaseMode,
    /// Timed mode only: key code → release deadline.
    pending_release: Vec<(&'static str, Instant)>,
    scope_rx: Option<Consumer<f32>>,
    scope: Vec<f32>,
    output: Option<AudioOutput>,
    notice: Option<Notice>,
    should_quit: bool,
}

impl App {
    pub fn new(
        piano: Piano<RingSink>,
        output: Option<AudioOutput>,
        scope_rx: Option<Consumer<f32>>,
        release_mode: ReleaseMode,
    ) -> Self {
        let notice = if piano.is_silent() {
            Some(Notice::new(
                "Audio output unavailable, running silent",
                NoticeLevel::Warning,
            ))
        } else {
            None
        };

        Self {
            piano,
            input: InputDispatcher::new(),
            release_mode,
            pending_release: Vec::new(),
            scope_rx,
            scope: vec![0.0; VIS_BUFFER_SIZE],
            output,
            notice,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scope();
            self.release_expired(Instant::now());
            self.piano.flush();
            self.expire_notice();

            terminal.draw(|frame| ui::render(frame, &self.status(), &self.scope))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::FocusLost => self.release_everything(),
                    _ => {}
                }
            }
        }

        self.release_everything();
        self.piano.all_notes_off();
        Ok(())
    }

    fn poll_scope(&mut self) {
        let Some(rx) = self.scope_rx.as_mut() else {
            return;
        };

        while let Ok(sample) = rx.pop() {
            self.scope.push(sample);
        }
        if self.scope.len() > VIS_BUFFER_SIZE {
            let excess = self.scope.len() - VIS_BUFFER_SIZE;
            self.scope.drain(0..excess);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let pressed = key.kind == KeyEventKind::Press;

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('-') | KeyCode::Char('_') if key.kind != KeyEventKind::Release => {
                self.nudge_volume(-VOLUME_STEP);
                return;
            }
            KeyCode::Char('=') | KeyCode::Char('+') if key.kind != KeyEventKind::Release => {
                self.nudge_volume(VOLUME_STEP);
                return;
            }
            _ => {}
        }

        let Some(code) = super::keys::dom_code(key.code) else {
            return;
        };

        let outcome = match (self.release_mode, key.kind) {
            (ReleaseMode::Reported, KeyEventKind::Press) => {
                self.input.key_down(code, false, &mut self.piano)
            }
            (ReleaseMode::Reported, KeyEventKind::Repeat) => {
                self.input.key_down(code, true, &mut self.piano)
            }
            (ReleaseMode::Reported, KeyEventKind::Release) => {
                self.input.key_up(code, &mut self.piano)
            }
            (ReleaseMode::Timed(hold), _) if pressed => self.timed_press(code, hold),
            (ReleaseMode::Timed(_), _) => InputOutcome::Ignored,
        };

        self.show_outcome(outcome);
    }

    /// Terminal auto-repeat arrives as more presses: treat a press of a key
    /// that is already held as a repeat and push its release further out.
    fn timed_press(&mut self, code: &'static str, hold: Duration) -> InputOutcome {
        let deadline = Instant::now() + hold;

        if let Some(entry) = self.pending_release.iter_mut().find(|(c, _)| *c == code) {
            entry.1 = deadline;
            return self.input.key_down(code, true, &mut self.piano);
        }

        let outcome = self.input.key_down(code, false, &mut self.piano);
        if matches!(outcome, InputOutcome::NoteOn(_)) {
            self.pending_release.push((code, deadline));
        }
        outcome
    }

    fn release_expired(&mut self, now: Instant) {
        let mut i = 0;
        while i < self.pending_release.len() {
            let (code, deadline) = self.pending_release[i];
            if deadline <= now {
                self.pending_release.swap_remove(i);
                self.input.key_up(code, &mut self.piano);
            } else {
                i += 1;
            }
        }
    }

    fn release_everything(&mut self) {
        self.pending_release.clear();
        let released = self.input.release_all(&mut self.piano);
        if !released.is_empty() {
            debug!(count = released.len(), "released held keys");
        }
    }

    fn nudge_volume(&mut self, delta: f32) {
        let volume = self.piano.set_master_volume(self.piano.master_volume() + delta);
        self.notice = Some(Notice::new(
            format!("Volume {:.0}%", volume * 100.0),
            NoticeLevel::Info,
        ));
    }

    fn show_outcome(&mut self, outcome: InputOutcome) {
        match outcome {
            InputOutcome::OctaveChanged(shift) => {
                self.notice = Some(Notice::new(
                    format!("Octave shift {shift:+}"),
                    NoticeLevel::Info,
                ));
            }
            InputOutcome::OctaveRejected(err) => {
                self.notice = Some(Notice::new(
                    capitalize(&err.to_string()),
                    NoticeLevel::Warning,
                ));
            }
            InputOutcome::NoteOn(_) | InputOutcome::NoteOff(_) | InputOutcome::Ignored => {}
        }
    }

    fn expire_notice(&mut self) {
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.shown_at.elapsed() > NOTICE_TTL)
        {
            self.notice = None;
        }
    }

    fn status(&self) -> StatusView<'_> {
        let held: Vec<Note> = self.piano.active_notes();
        StatusView {
            octave_shift: self.piano.octave_shift(),
            volume: self.piano.master_volume(),
            held,
            output: self.output.as_ref(),
            notice: self.notice.as_ref(),
            stats: AudioStats::from_buffer(&self.scope),
            timed_release: matches!(self.release_mode, ReleaseMode::Timed(_)),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
