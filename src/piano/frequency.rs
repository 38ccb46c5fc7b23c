use crate::piano::note::{Note, PitchClass};

/*
Equal-Tempered Frequencies
==========================

Every pitch class has a base frequency at octave 0. Going up one octave
doubles the frequency, so

    frequency(note) = base(pitch_class) * 2^octave

  pitch   base (Hz)     pitch   base (Hz)
  C       16.35         F#      23.12
  C#      17.32         G       24.50
  D       18.35         G#      25.96
  D#      19.45         A       27.50
  E       20.60         A#      29.14
  F       21.83         B       30.87

Check: A4 = 27.50 * 2^4 = 440.0 Hz.

The octave shift is applied before the lookup. A shifted octave outside
[2, 6] falls back to the written note (see `Note::shifted`).
*/

pub fn base_frequency(pitch: PitchClass) -> f32 {
    match pitch {
        PitchClass::C => 16.35,
        PitchClass::Cs => 17.32,
        PitchClass::D => 18.35,
        PitchClass::Ds => 19.45,
        PitchClass::E => 20.60,
        PitchClass::F => 21.83,
        PitchClass::Fs => 23.12,
        PitchClass::G => 24.50,
        PitchClass::Gs => 25.96,
        PitchClass::A => 27.50,
        PitchClass::As => 29.14,
        PitchClass::B => 30.87,
    }
}

/// Playback frequency of `note` after transposing by `octave_shift` octaves.
pub fn frequency_of(note: Note, octave_shift: i8) -> f32 {
    let sounding = note.shifted(octave_shift);
    base_frequency(sounding.pitch) * 2.0_f32.powi(sounding.octave as i32)
}
