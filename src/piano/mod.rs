//! Musical vocabulary of the piano: notes, tuning and per-register timbre.

/// Equal-tempered frequency lookup with octave shift.
pub mod frequency;
/// Note identifiers and the fixed keyboard range.
pub mod note;
/// Harmonic mix and envelope shape for each octave band.
pub mod profile;

pub use frequency::frequency_of;
pub use note::{Note, PitchClass, MAX_OCTAVE, MIN_OCTAVE};
pub use profile::{profile_for, EnvelopeShape, HarmonicMix, Profile};
