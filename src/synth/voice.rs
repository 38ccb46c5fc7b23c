use tracing::debug;

use crate::{
    dsp::automation::{ParamEvent, ParamTimeline},
    graph::{
        compressor::CompressorNode,
        extensions::NodeExt,
        filter::FilterNode,
        gain::AutomatedGain,
        node::{GraphNode, RenderCtx},
        partials::Partials,
    },
    piano::{
        frequency::frequency_of,
        note::Note,
        profile::{profile_for, EnvelopeShape, Profile},
    },
    synth::sink::AudioSink,
    MAX_BLOCK_SIZE,
};

/*
Voice Lifecycle
===============

A voice is split in two halves that never share memory:

  control thread                         audio thread
  ──────────────                         ────────────
  VoiceHandle                            Voice
    id, note, start time                   id, frequency
    mirror of the gain timeline            oscillators → gain → lowpass → compressor
        │                                      ▲
        └──── ParamEvent / stop via sink ──────┘

Every automation event is applied twice: once to the mirror and once (through
the sink) to the real gain stage. The mirror lets the control side answer
"what is the gain right now?" without touching the audio thread, which is
what a release needs to splice in without a click.

Start (t0 = sink.now()):

    set(0, t0)
    linear(attack_level,  t0 + attack)
    exp(decay_level,      t0 + attack + decay)
    exp(sustain_level,    t0 + attack + decay + sustain)

Stop (now = sink.now()):

    v = mirror.value_at(now)            ← read before cancelling
    cancel(now)
    set(v, now)
    exp(release_floor, now + release)
    stop oscillators at now + release

The three release events and the stop travel as one `VoiceRelease`, so a
sink either delivers all of it or holds all of it back; a voice is never
left with its gain cancelled but its oscillators still running.

Once the oscillators have passed their stop time the engine drops the voice.
*/

/// Engine-side identity of a voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceId(pub u64);

/// Release tail applied when a voice is stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    /// Seconds from stop until the oscillators are silenced.
    pub seconds: f32,
    /// Gain the exponential release ramps to.
    pub floor: f32,
}

impl Default for Release {
    fn default() -> Self {
        Self {
            seconds: 0.3,
            floor: 0.001,
        }
    }
}

/// The render-side voice: a graph plus the frequency it plays at.
pub struct Voice {
    id: VoiceId,
    frequency: f32,
    graph: Box<dyn GraphNode>,
}

impl Voice {
    pub fn new(id: VoiceId, frequency: f32, graph: impl GraphNode + 'static) -> Self {
        Self {
            id,
            frequency,
            graph: Box::new(graph),
        }
    }

    /// Five oscillators → automated gain → 8f lowpass → compressor.
    pub fn piano(id: VoiceId, frequency: f32, profile: &Profile) -> Self {
        let graph = Partials::piano(&profile.harmonics)
            .amplify(AutomatedGain::new(0.0))
            .through(FilterNode::key_tracked(8.0).with_q(0.5))
            .through(CompressorNode::piano());

        Self::new(id, frequency, graph)
    }

    pub fn id(&self) -> VoiceId {
        self.id
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Render one block whose first sample sits at `time` on the audio clock.
    ///
    /// Blocks longer than `MAX_BLOCK_SIZE` are rendered in pieces.
    pub fn render(&mut self, out: &mut [f32], sample_rate: f32, time: f64) {
        let ctx = RenderCtx::from_freq(sample_rate, self.frequency).at(time);
        for (n, chunk) in out.chunks_mut(MAX_BLOCK_SIZE).enumerate() {
            let chunk_ctx = ctx.at(ctx.time_of(n * MAX_BLOCK_SIZE));
            self.graph.render_block(chunk, &chunk_ctx);
        }
    }

    pub fn schedule(&mut self, event: &ParamEvent) {
        self.graph.schedule(event);
    }

    pub fn stop_at(&mut self, time: f64) {
        self.graph.stop_at(time);
    }

    pub fn is_finished(&self) -> bool {
        !self.graph.is_active()
    }
}

/// Gain automation for the attack/decay/sustain shape starting at `t0`.
pub fn envelope_events(shape: &EnvelopeShape, t0: f64) -> [ParamEvent; 4] {
    let attack_end = t0 + shape.attack as f64;
    let decay_end = attack_end + shape.decay as f64;
    let sustain_start = decay_end + shape.sustain as f64;

    [
        ParamEvent::Set {
            value: 0.0,
            time: t0,
        },
        ParamEvent::LinearRamp {
            value: shape.attack_level,
            time: attack_end,
        },
        ParamEvent::ExponentialRamp {
            value: shape.decay_level,
            time: decay_end,
        },
        ParamEvent::ExponentialRamp {
            value: shape.sustain_level,
            time: sustain_start,
        },
    ]
}

/// Everything needed to release one voice, delivered as a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceRelease {
    /// When the release starts.
    pub at: f64,
    /// Gain at `at`, interpolated from whatever ramp was in flight.
    pub from_gain: f32,
    pub floor: f32,
    /// When the oscillators stop.
    pub until: f64,
}

impl VoiceRelease {
    pub fn events(&self) -> [ParamEvent; 3] {
        [
            ParamEvent::Cancel { from: self.at },
            ParamEvent::Set {
                value: self.from_gain,
                time: self.at,
            },
            ParamEvent::ExponentialRamp {
                value: self.floor,
                time: self.until,
            },
        ]
    }
}

/// Control-side handle of a sounding voice. The only thing it can do is stop.
#[derive(Debug)]
pub struct VoiceHandle {
    id: VoiceId,
    note: Note,
    started_at: f64,
    gain: ParamTimeline,
    release: Release,
}

impl VoiceHandle {
    pub fn id(&self) -> VoiceId {
        self.id
    }

    pub fn note(&self) -> Note {
        self.note
    }

    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Voice gain at `time`, as scheduled so far.
    pub fn gain_at(&self, time: f64) -> f32 {
        self.gain.value_at(time)
    }

    /// Fade out from the current gain and schedule the oscillators to stop.
    ///
    /// Returns the audio-clock time at which the voice goes silent.
    pub fn stop<S: AudioSink + ?Sized>(mut self, sink: &mut S) -> f64 {
        let now = sink.now();
        let release = VoiceRelease {
            at: now,
            from_gain: self.gain.value_at(now),
            floor: self.release.floor,
            until: now + self.release.seconds as f64,
        };

        for event in release.events() {
            self.gain.apply(event);
        }
        sink.release_voice(self.id, release);

        debug!(
            note = %self.note,
            voice = self.id.0,
            gain = release.from_gain,
            until = release.until,
            "voice released"
        );
        release.until
    }
}

/// Builds voices and hands them to a sink.
#[derive(Debug, Default)]
pub struct Synthesizer {
    next_id: u64,
    release: Release,
}

impl Synthesizer {
    pub fn new(release: Release) -> Self {
        Self { next_id: 0, release }
    }

    /// Start a voice for `note`, transposed by `octave_shift`.
    pub fn start_voice<S: AudioSink + ?Sized>(
        &mut self,
        note: Note,
        octave_shift: i8,
        sink: &mut S,
    ) -> VoiceHandle {
        let sounding = note.shifted(octave_shift);
        let frequency = frequency_of(note, octave_shift);
        let profile = profile_for(sounding.octave);

        let id = VoiceId(self.next_id);
        self.next_id += 1;

        let t0 = sink.now();
        let mut voice = Voice::piano(id, frequency, &profile);
        let mut gain = ParamTimeline::new(0.0);
        for event in envelope_events(&profile.envelope, t0) {
            voice.schedule(&event);
            gain.apply(event);
        }
        sink.add_voice(voice);

        debug!(%note, %sounding, frequency, voice = id.0, at = t0, "voice started");

        VoiceHandle {
            id,
            note,
            started_at: t0,
            gain,
            release: self.release,
        }
    }
}
