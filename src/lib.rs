pub mod config; // Session settings, optionally loaded from TOML
pub mod dsp;
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod input; // Key/pointer dedupe and the key layout
pub mod piano; // Notes, tuning and per-octave timbre
pub mod session;
pub mod synth; // Voices, render engine, audio sinks

pub use config::PianoConfig;
pub use error::{ConfigError, NoteParseError, OctaveError};
pub use piano::{Note, PitchClass};
pub use session::Piano;

pub const MAX_BLOCK_SIZE: usize = 2048;
