#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, session::octave_shift_range, synth::voice::Release};

/// Session settings. Every field has a default, so a config file only needs
/// the values it changes:
///
/// ```toml
/// master_volume = 0.5
/// octave_shift = -1
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PianoConfig {
    /// Master output gain, 0.0..=1.0.
    pub master_volume: f32,
    /// Initial octave shift.
    pub octave_shift: i8,
    /// Seconds from note off until the voice is silent.
    pub release_seconds: f32,
    /// Gain the release ramps down to before the oscillators stop.
    pub release_floor: f32,
    /// Capacity of the control → audio command queue.
    pub queue_capacity: usize,
}

impl Default for PianoConfig {
    fn default() -> Self {
        Self {
            master_volume: 0.7,
            octave_shift: 0,
            release_seconds: 0.3,
            release_floor: 0.001,
            queue_capacity: 1024,
        }
    }
}

impl PianoConfig {
    #[cfg(feature = "serde")]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: PianoConfig = toml::from_str(text)?;
        config.validate()
    }

    #[cfg(feature = "serde")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Clamp soft limits and reject values the session cannot honor.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        let range = octave_shift_range();
        if !range.contains(&self.octave_shift) {
            return Err(ConfigError::OctaveShift {
                shift: self.octave_shift,
                min: *range.start(),
                max: *range.end(),
            });
        }

        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.release_seconds = self.release_seconds.max(0.001);
        // an exponential ramp cannot reach zero
        self.release_floor = self.release_floor.clamp(1e-6, 1.0);
        self.queue_capacity = self.queue_capacity.max(16);
        Ok(self)
    }

    pub fn release(&self) -> Release {
        Release {
            seconds: self.release_seconds,
            floor: self.release_floor,
        }
    }
}
