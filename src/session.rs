use std::ops::RangeInclusive;

use tracing::{debug, info, trace, warn};

use crate::{
    config::PianoConfig,
    error::OctaveError,
    input::dispatcher::Performer,
    piano::note::{Note, MAX_OCTAVE, MIN_OCTAVE},
    synth::{registry::VoiceRegistry, sink::AudioSink, voice::Synthesizer},
};

/// Octave shifts that keep the whole keyboard inside the playable range.
pub fn octave_shift_range() -> RangeInclusive<i8> {
    (MIN_OCTAVE - Note::lowest().octave)..=(MAX_OCTAVE - Note::highest().octave)
}

/// One playing session: octave shift, master volume and the sounding voices.
///
/// Without a sink the piano is silent. Note events are accepted and ignored,
/// while octave and volume still track the user's changes.
pub struct Piano<S: AudioSink> {
    octave_shift: i8,
    master_volume: f32,
    registry: VoiceRegistry,
    synth: Synthesizer,
    sink: Option<S>,
}

impl<S: AudioSink> Piano<S> {
    pub fn new(config: PianoConfig, sink: S) -> Self {
        let mut piano = Self::build(config, Some(sink));
        piano.push_master_volume();
        piano
    }

    /// A piano with no audio output.
    pub fn silent(config: PianoConfig) -> Self {
        warn!("no audio output, notes will not sound");
        Self::build(config, None)
    }

    fn build(config: PianoConfig, sink: Option<S>) -> Self {
        let range = octave_shift_range();
        Self {
            octave_shift: config.octave_shift.clamp(*range.start(), *range.end()),
            master_volume: config.master_volume.clamp(0.0, 1.0),
            registry: VoiceRegistry::new(),
            synth: Synthesizer::new(config.release()),
            sink,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.sink.is_none()
    }

    pub fn note_on(&mut self, note: Note) {
        let Some(sink) = self.sink.as_mut() else {
            trace!(%note, "silent, note on dropped");
            return;
        };
        self.registry
            .note_on(note, self.octave_shift, &mut self.synth, sink);
    }

    pub fn note_off(&mut self, note: Note) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        self.registry.note_off(note, sink);
    }

    pub fn all_notes_off(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            self.registry.all_notes_off(sink);
        }
    }

    pub fn raise_octave(&mut self) -> Result<i8, OctaveError> {
        let next = self.octave_shift + 1;
        if !octave_shift_range().contains(&next) {
            return Err(OctaveError::AboveRange {
                shift: self.octave_shift,
            });
        }
        self.octave_shift = next;
        Ok(next)
    }

    pub fn lower_octave(&mut self) -> Result<i8, OctaveError> {
        let next = self.octave_shift - 1;
        if !octave_shift_range().contains(&next) {
            return Err(OctaveError::BelowRange {
                shift: self.octave_shift,
            });
        }
        self.octave_shift = next;
        Ok(next)
    }

    pub fn octave_shift(&self) -> i8 {
        self.octave_shift
    }

    /// Set master volume, clamped to [0, 1]. Takes effect immediately.
    pub fn set_master_volume(&mut self, volume: f32) -> f32 {
        self.master_volume = volume.clamp(0.0, 1.0);
        info!(volume = self.master_volume, "master volume changed");
        self.push_master_volume();
        self.master_volume
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    fn push_master_volume(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            let now = sink.now();
            sink.set_master_volume(self.master_volume, now);
        }
    }

    /// Hand the sink another chance to deliver held-back work. Returns how
    /// much is still waiting.
    pub fn flush(&mut self) -> usize {
        self.sink.as_mut().map_or(0, |sink| sink.flush())
    }

    /// Sounding notes, lowest first.
    pub fn active_notes(&self) -> Vec<Note> {
        self.registry.notes()
    }

    pub fn active_voice_count(&self) -> usize {
        self.registry.len()
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    pub fn sink_mut(&mut self) -> Option<&mut S> {
        self.sink.as_mut()
    }
}

impl<S: AudioSink> Performer for Piano<S> {
    fn note_on(&mut self, note: Note) {
        Piano::note_on(self, note);
    }

    fn note_off(&mut self, note: Note) {
        Piano::note_off(self, note);
    }

    fn raise_octave(&mut self) -> Result<i8, OctaveError> {
        let result = Piano::raise_octave(self);
        debug!(?result, "raise octave");
        result
    }

    fn lower_octave(&mut self) -> Result<i8, OctaveError> {
        let result = Piano::lower_octave(self);
        debug!(?result, "lower octave");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piano::note::PitchClass;
    use crate::synth::engine::Engine;

    fn piano() -> Piano<Engine> {
        Piano::new(PianoConfig::default(), Engine::new(48_000.0, 0.7))
    }

    #[test]
    fn shift_range_fits_keyboard() {
        assert_eq!(octave_shift_range(), -1..=1);
    }

    #[test]
    fn raise_twice_from_zero() {
        let mut piano = piano();
        assert_eq!(piano.raise_octave(), Ok(1));
        assert_eq!(
            piano.raise_octave(),
            Err(OctaveError::AboveRange { shift: 1 })
        );
        assert_eq!(piano.octave_shift(), 1);
    }

    #[test]
    fn lower_below_range_is_rejected() {
        let mut piano = piano();
        assert_eq!(piano.lower_octave(), Ok(-1));
        assert_eq!(
            piano.lower_octave(),
            Err(OctaveError::BelowRange { shift: -1 })
        );
        assert_eq!(piano.octave_shift(), -1);
    }

    #[test]
    fn note_on_twice_keeps_one_entry() {
        let mut piano = piano();
        let c3 = Note::new(PitchClass::C, 3);

        piano.note_on(c3);
        piano.note_on(c3);

        assert_eq!(piano.active_notes(), vec![c3]);
        piano.note_off(c3);
        piano.note_off(c3);
        assert_eq!(piano.active_voice_count(), 0);
    }

    #[test]
    fn silent_piano_accepts_everything() {
        let mut piano: Piano<Engine> = Piano::silent(PianoConfig::default());
        let a4 = Note::new(PitchClass::A, 4);

        piano.note_on(a4);
        piano.note_off(a4);
        assert!(piano.is_silent());
        assert_eq!(piano.active_voice_count(), 0);
        assert_eq!(piano.raise_octave(), Ok(1));
        assert_eq!(piano.set_master_volume(0.2), 0.2);
    }

    #[test]
    fn volume_is_clamped_and_forwarded() {
        let mut piano = piano();
        assert_eq!(piano.set_master_volume(3.0), 1.0);
        assert_eq!(piano.set_master_volume(-1.0), 0.0);

        let engine = piano.sink().unwrap();
        assert_eq!(engine.master_volume_at(engine.now()), 0.0);
    }

    #[test]
    fn initial_volume_comes_from_config() {
        let config = PianoConfig {
            master_volume: 0.25,
            ..PianoConfig::default()
        };
        let piano = Piano::new(config, Engine::new(48_000.0, 1.0));
        let engine = piano.sink().unwrap();
        assert_eq!(engine.master_volume_at(0.0), 0.25);
    }
}
