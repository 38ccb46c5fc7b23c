use std::collections::HashSet;

use tracing::{info, trace, warn};

use crate::{
    error::OctaveError,
    input::keymap::{self, OCTAVE_DOWN, OCTAVE_UP},
    piano::note::Note,
};

/*
Input Dedupe
============

Keyboards auto-repeat and pointers drag; the synthesizer must still see
exactly one note-on and one note-off per physical press. Each mapped key
code has two states:

              key_down (not repeat)
       ┌────┐ ─────────────────────→ ┌──────┐
       │ Up │                        │ Down │ ── key_down: ignored
       └────┘ ←───────────────────── └──────┘
                     key_up

    Up   + key_down  → Down, note_on
    Down + key_down  → ignored (held or auto-repeat)
    Down + key_up    → Up, note_off
    Up   + key_up    → ignored

Octave arrows are commands, not notes: they act on every non-repeat press
and never enter the held set.

The pointer is tracked with a single pressed flag, independent of the
keyboard. While pressed, entering a key plays it and leaving a key releases
it, so dragging across the keys glides note by note.
*/

/// What the dispatcher drives. `Piano` is the real one.
pub trait Performer {
    fn note_on(&mut self, note: Note);
    fn note_off(&mut self, note: Note);
    fn raise_octave(&mut self) -> Result<i8, OctaveError>;
    fn lower_octave(&mut self) -> Result<i8, OctaveError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Ignored,
    NoteOn(Note),
    NoteOff(Note),
    OctaveChanged(i8),
    OctaveRejected(OctaveError),
}

#[derive(Debug, Default)]
pub struct InputDispatcher {
    held: HashSet<&'static str>,
    mouse_pressed: bool,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down<P: Performer + ?Sized>(
        &mut self,
        code: &str,
        repeat: bool,
        performer: &mut P,
    ) -> InputOutcome {
        if repeat {
            trace!(code, "auto-repeat ignored");
            return InputOutcome::Ignored;
        }

        match code {
            OCTAVE_UP => return octave_outcome(performer.raise_octave()),
            OCTAVE_DOWN => return octave_outcome(performer.lower_octave()),
            _ => {}
        }

        let Some((key, note)) = keymap::lookup(code) else {
            trace!(code, "unmapped key");
            return InputOutcome::Ignored;
        };

        if !self.held.insert(key) {
            trace!(code, "key already down");
            return InputOutcome::Ignored;
        }

        performer.note_on(note);
        InputOutcome::NoteOn(note)
    }

    pub fn key_up<P: Performer + ?Sized>(&mut self, code: &str, performer: &mut P) -> InputOutcome {
        let Some((key, note)) = keymap::lookup(code) else {
            return InputOutcome::Ignored;
        };

        if !self.held.remove(key) {
            trace!(code, "key up without key down");
            return InputOutcome::Ignored;
        }

        performer.note_off(note);
        InputOutcome::NoteOff(note)
    }

    pub fn mouse_down<P: Performer + ?Sized>(&mut self, note: Note, performer: &mut P) -> InputOutcome {
        self.mouse_pressed = true;
        performer.note_on(note);
        InputOutcome::NoteOn(note)
    }

    pub fn mouse_up<P: Performer + ?Sized>(&mut self, note: Note, performer: &mut P) -> InputOutcome {
        self.mouse_pressed = false;
        performer.note_off(note);
        InputOutcome::NoteOff(note)
    }

    pub fn mouse_enter<P: Performer + ?Sized>(&mut self, note: Note, performer: &mut P) -> InputOutcome {
        if !self.mouse_pressed {
            return InputOutcome::Ignored;
        }
        performer.note_on(note);
        InputOutcome::NoteOn(note)
    }

    pub fn mouse_leave<P: Performer + ?Sized>(&mut self, note: Note, performer: &mut P) -> InputOutcome {
        if !self.mouse_pressed {
            return InputOutcome::Ignored;
        }
        performer.note_off(note);
        InputOutcome::NoteOff(note)
    }

    /// Release every held key, e.g. when the window loses focus and the
    /// matching key-up events will never arrive.
    pub fn release_all<P: Performer + ?Sized>(&mut self, performer: &mut P) -> Vec<Note> {
        // The mouse-up is lost along with the key-ups
        self.mouse_pressed = false;
        let mut released: Vec<Note> = self
            .held
            .drain()
            .filter_map(keymap::note_for_code)
            .collect();
        released.sort();
        for &note in &released {
            performer.note_off(note);
        }
        released
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }
}

fn octave_outcome(result: Result<i8, OctaveError>) -> InputOutcome {
    match result {
        Ok(shift) => {
            info!(shift, "octave shift changed");
            InputOutcome::OctaveChanged(shift)
        }
        Err(err) => {
            warn!(%err, "octave shift rejected");
            InputOutcome::OctaveRejected(err)
        }
    }
}
