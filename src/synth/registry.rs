use std::collections::HashMap;

use tracing::trace;

use crate::{
    piano::note::Note,
    synth::{
        sink::AudioSink,
        voice::{Synthesizer, VoiceHandle},
    },
};

/// At most one sounding voice per note.
///
/// Starting a note that is already sounding stops the old voice first, so
/// the map never holds two handles for the same note and its length is the
/// number of distinct notes currently held.
#[derive(Debug, Default)]
pub struct VoiceRegistry {
    voices: HashMap<Note, VoiceHandle>,
}

impl VoiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note_on<S: AudioSink + ?Sized>(
        &mut self,
        note: Note,
        octave_shift: i8,
        synth: &mut Synthesizer,
        sink: &mut S,
    ) {
        if let Some(previous) = self.voices.remove(&note) {
            trace!(%note, "retriggering sounding note");
            previous.stop(sink);
        }

        let handle = synth.start_voice(note, octave_shift, sink);
        self.voices.insert(note, handle);
    }

    /// Returns `false` when the note was not sounding.
    pub fn note_off<S: AudioSink + ?Sized>(&mut self, note: Note, sink: &mut S) -> bool {
        match self.voices.remove(&note) {
            Some(handle) => {
                handle.stop(sink);
                true
            }
            None => {
                trace!(%note, "note off for silent note ignored");
                false
            }
        }
    }

    pub fn all_notes_off<S: AudioSink + ?Sized>(&mut self, sink: &mut S) {
        for (_, handle) in self.voices.drain() {
            handle.stop(sink);
        }
    }

    pub fn contains(&self, note: Note) -> bool {
        self.voices.contains_key(&note)
    }

    pub fn get(&self, note: Note) -> Option<&VoiceHandle> {
        self.voices.get(&note)
    }

    /// Sounding notes, lowest first.
    pub fn notes(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = self.voices.keys().copied().collect();
        notes.sort();
        notes
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}
