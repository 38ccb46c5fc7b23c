use thiserror::Error;

/// Octave shift requests that would push the keyboard out of the playable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OctaveError {
    #[error("cannot raise octave further (shift is already {shift})")]
    AboveRange { shift: i8 },
    #[error("cannot lower octave further (shift is already {shift})")]
    BelowRange { shift: i8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteParseError {
    #[error("invalid note name: {0:?}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),

    #[error("octave shift {shift} is outside [{min}, {max}]")]
    OctaveShift { shift: i8, min: i8, max: i8 },
}
