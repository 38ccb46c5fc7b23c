use crate::piano::note::{Note, PitchClass::*};

/*
Computer-Keyboard Layout
========================

Two rows of a QWERTY keyboard act as piano keys. Codes are physical key
positions (`KeyboardEvent.code` names), so the layout does not move with the
user's keyboard language.

  black:   S  D     G  H  J     L  1     3  4  5     7  8     0
  white:  Z  X  C  V  B  N  M  ,  .  /  W  E  R  T  Y  U  I  O  P
          C3 D3 E3 F3 G3 A3 B3 C4 D4 E4 F4 G4 A4 B4 C5 D5 E5 F5 G5
                                     Q ─┘ (second key for E4)

ArrowUp / ArrowDown shift the whole keyboard by an octave.
*/

pub const OCTAVE_UP: &str = "ArrowUp";
pub const OCTAVE_DOWN: &str = "ArrowDown";

pub const KEY_TO_NOTE: [(&str, Note); 33] = [
    ("KeyZ", Note::new(C, 3)),
    ("KeyX", Note::new(D, 3)),
    ("KeyC", Note::new(E, 3)),
    ("KeyV", Note::new(F, 3)),
    ("KeyB", Note::new(G, 3)),
    ("KeyN", Note::new(A, 3)),
    ("KeyM", Note::new(B, 3)),
    ("Comma", Note::new(C, 4)),
    ("Period", Note::new(D, 4)),
    ("Slash", Note::new(E, 4)),
    ("KeyQ", Note::new(E, 4)),
    ("KeyW", Note::new(F, 4)),
    ("KeyE", Note::new(G, 4)),
    ("KeyR", Note::new(A, 4)),
    ("KeyT", Note::new(B, 4)),
    ("KeyY", Note::new(C, 5)),
    ("KeyU", Note::new(D, 5)),
    ("KeyI", Note::new(E, 5)),
    ("KeyO", Note::new(F, 5)),
    ("KeyP", Note::new(G, 5)),
    ("KeyS", Note::new(Cs, 3)),
    ("KeyD", Note::new(Ds, 3)),
    ("KeyG", Note::new(Fs, 3)),
    ("KeyH", Note::new(Gs, 3)),
    ("KeyJ", Note::new(As, 3)),
    ("KeyL", Note::new(Cs, 4)),
    ("Digit1", Note::new(Ds, 4)),
    ("Digit3", Note::new(Fs, 4)),
    ("Digit4", Note::new(Gs, 4)),
    ("Digit5", Note::new(As, 4)),
    ("Digit7", Note::new(Cs, 5)),
    ("Digit8", Note::new(Ds, 5)),
    ("Digit0", Note::new(Fs, 5)),
];

/// The mapped entry for a key code, with the code borrowed from the table.
pub fn lookup(code: &str) -> Option<(&'static str, Note)> {
    KEY_TO_NOTE.iter().copied().find(|(key, _)| *key == code)
}

pub fn note_for_code(code: &str) -> Option<Note> {
    lookup(code).map(|(_, note)| note)
}

/// Printable label for a mapped key code: `KeyZ` → 'Z', `Digit1` → '1'.
pub fn key_label_for_code(code: &str) -> Option<char> {
    lookup(code)?;
    match code {
        "Comma" => Some(','),
        "Period" => Some('.'),
        "Slash" => Some('/'),
        _ => code
            .strip_prefix("Key")
            .or_else(|| code.strip_prefix("Digit"))
            .and_then(|rest| rest.chars().next()),
    }
}

/// Label of the first key that plays `note`, if any.
pub fn key_label(note: Note) -> Option<char> {
    KEY_TO_NOTE
        .iter()
        .find(|(_, mapped)| *mapped == note)
        .and_then(|(code, _)| key_label_for_code(code))
}
