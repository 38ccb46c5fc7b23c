use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::NoteParseError;

/*
Note Identifiers
================

A note is a pitch class (one of the twelve semitones of the chromatic scale)
paired with an octave number. Octaves use scientific pitch notation: middle C
is C4, and A4 is the 440 Hz tuning reference.

  C  C#  D  D#  E  F  F#  G  G#  A  A#  B
  0  1   2  3   4  5  6   7  8   9  10  11   <- semitone index

Only sharps are spelled. The keyboard exposes a fixed, contiguous range of
32 notes from C3 up to G5; everything that plays through the core is one of
those notes, optionally transposed by the octave shift.

  C3 ............ B3 | C4 ............ B4 | C5 ...... G5
  12 notes           | 12 notes           | 8 notes
*/

/// Lowest octave any shifted note may sound in.
pub const MIN_OCTAVE: i8 = 2;
/// Highest octave any shifted note may sound in.
pub const MAX_OCTAVE: i8 = 6;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    pub fn semitone(self) -> u8 {
        self as u8
    }

    pub fn is_sharp(self) -> bool {
        matches!(
            self,
            PitchClass::Cs | PitchClass::Ds | PitchClass::Fs | PitchClass::Gs | PitchClass::As
        )
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pc| pc.name() == name)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pitch class in a specific octave, e.g. `C#3`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub pitch: PitchClass,
    pub octave: i8,
}

impl Note {
    pub const fn new(pitch: PitchClass, octave: i8) -> Self {
        Self { pitch, octave }
    }

    /// The playable keyboard, C3 through G5 in ascending order.
    pub fn keyboard() -> &'static [Note] {
        &KEYBOARD
    }

    pub fn lowest() -> Note {
        KEYBOARD[0]
    }

    pub fn highest() -> Note {
        KEYBOARD[KEYBOARD.len() - 1]
    }

    /// Transpose by whole octaves.
    ///
    /// A shift that would leave the playable octave range returns the note
    /// unchanged, so the key still sounds at its written pitch.
    pub fn shifted(self, octave_shift: i8) -> Note {
        let octave = self.octave.saturating_add(octave_shift);
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
            return self;
        }
        Note::new(self.pitch, octave)
    }

    /// Semitones above C0.
    pub fn semitones(self) -> i32 {
        self.octave as i32 * 12 + self.pitch.semitone() as i32
    }
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.semitones().cmp(&other.semitones())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch, self.octave)
    }
}

impl FromStr for Note {
    type Err = NoteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NoteParseError::Invalid(s.to_string());

        let split = s
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or_else(invalid)?;
        let (name, octave) = s.split_at(split);

        let pitch = PitchClass::from_name(name).ok_or_else(invalid)?;
        let octave = octave.parse::<i8>().map_err(|_| invalid())?;

        Ok(Note::new(pitch, octave))
    }
}

const fn octave_of(octave: i8) -> [Note; 12] {
    use PitchClass::*;
    [
        Note::new(C, octave),
        Note::new(Cs, octave),
        Note::new(D, octave),
        Note::new(Ds, octave),
        Note::new(E, octave),
        Note::new(F, octave),
        Note::new(Fs, octave),
        Note::new(G, octave),
        Note::new(Gs, octave),
        Note::new(A, octave),
        Note::new(As, octave),
        Note::new(B, octave),
    ]
}

const KEYBOARD: [Note; 32] = {
    let three = octave_of(3);
    let four = octave_of(4);
    let five = octave_of(5);
    let mut notes = [Note::new(PitchClass::C, 3); 32];
    let mut i = 0;
    while i < 12 {
        notes[i] = three[i];
        notes[12 + i] = four[i];
        if i < 8 {
            notes[24 + i] = five[i];
        }
        i += 1;
    }
    notes
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_spans_c3_to_g5() {
        let keys = Note::keyboard();
        assert_eq!(keys.len(), 32);
        assert_eq!(keys[0], Note::new(PitchClass::C, 3));
        assert_eq!(keys[31], Note::new(PitchClass::G, 5));
        assert!(keys.windows(2).all(|w| w[1].semitones() - w[0].semitones() == 1));
    }

    #[test]
    fn parses_and_displays_sharps() {
        let note: Note = "C#3".parse().unwrap();
        assert_eq!(note, Note::new(PitchClass::Cs, 3));
        assert_eq!(note.to_string(), "C#3");
        assert_eq!("A4".parse::<Note>().unwrap(), Note::new(PitchClass::A, 4));
    }

    #[test]
    fn rejects_garbage() {
        assert!("H4".parse::<Note>().is_err());
        assert!("C".parse::<Note>().is_err());
        assert!("".parse::<Note>().is_err());
        assert!("Db4".parse::<Note>().is_err());
    }

    #[test]
    fn shift_inside_range_moves_octave() {
        let c3 = Note::new(PitchClass::C, 3);
        assert_eq!(c3.shifted(-1), Note::new(PitchClass::C, 2));
        assert_eq!(c3.shifted(2), Note::new(PitchClass::C, 5));
    }

    #[test]
    fn shift_outside_range_keeps_note() {
        let c3 = Note::new(PitchClass::C, 3);
        assert_eq!(c3.shifted(-2), c3);
        let g5 = Note::new(PitchClass::G, 5);
        assert_eq!(g5.shifted(2), g5);
    }

    #[test]
    fn ordering_follows_pitch() {
        let b3 = Note::new(PitchClass::B, 3);
        let c4 = Note::new(PitchClass::C, 4);
        assert!(b3 < c4);
    }
}
