use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use crate::{
    dsp::automation::{ParamEvent, ParamTimeline},
    synth::{
        message::{CommandReceiver, EngineCommand},
        sink::AudioSink,
        voice::{Voice, VoiceId, VoiceRelease},
    },
    MAX_BLOCK_SIZE,
};

/// Audio clock shared between the render thread and the control thread.
///
/// The engine advances it by the number of frames rendered; `now()` is the
/// time of the next frame it will render.
#[derive(Debug, Clone)]
pub struct Clock {
    frames: Arc<AtomicU64>,
    sample_rate: f32,
}

impl Clock {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            frames: Arc::new(AtomicU64::new(0)),
            sample_rate,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    pub fn now(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn advance(&self, frames: usize) {
        self.frames.fetch_add(frames as u64, Ordering::Release);
    }
}

/// Renders every live voice through the shared master gain.
pub struct Engine {
    sample_rate: f32,
    voices: Vec<Voice>,
    master: ParamTimeline,
    clock: Clock,
    voice_buffer: Vec<f32>,
    master_buffer: Vec<f32>,
}

impl Engine {
    pub fn new(sample_rate: f32, master_volume: f32) -> Self {
        Self {
            sample_rate,
            voices: Vec::with_capacity(64),
            master: ParamTimeline::new(master_volume),
            clock: Clock::new(sample_rate),
            voice_buffer: vec![0.0; MAX_BLOCK_SIZE],
            master_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// A handle to this engine's clock for the control thread.
    pub fn clock(&self) -> Clock {
        self.clock.clone()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Voices still rendering, including ones in their release tail.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn master_volume_at(&self, time: f64) -> f32 {
        self.master.value_at(time)
    }

    pub fn master(&self) -> &ParamTimeline {
        &self.master
    }

    pub fn apply(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::AddVoice(voice) => self.voices.push(*voice),
            EngineCommand::Schedule { voice, event } => {
                if let Some(v) = self.find_voice(voice) {
                    v.schedule(&event);
                }
            }
            EngineCommand::StopVoice { voice, at } => {
                if let Some(v) = self.find_voice(voice) {
                    v.stop_at(at);
                }
            }
            EngineCommand::Release { voice, release } => {
                if let Some(v) = self.find_voice(voice) {
                    for event in release.events() {
                        v.schedule(&event);
                    }
                    v.stop_at(release.until);
                }
            }
            EngineCommand::MasterVolume { volume, at } => {
                self.master.apply(ParamEvent::Cancel { from: at });
                self.master.apply(ParamEvent::Set { value: volume, time: at });
            }
        }
    }

    /// Drain pending commands, then render.
    pub fn render_from<R: CommandReceiver + ?Sized>(&mut self, rx: &mut R, out: &mut [f32]) {
        while let Some(command) = rx.pop() {
            self.apply(command);
        }
        self.render_block(out);
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_chunk(chunk);
        }
    }

    fn render_chunk(&mut self, out: &mut [f32]) {
        let time = self.clock.now();
        out.fill(0.0);

        let frames = &mut self.voice_buffer[..out.len()];
        for voice in &mut self.voices {
            frames.fill(0.0);
            voice.render(frames, self.sample_rate, time);
            for (o, v) in out.iter_mut().zip(frames.iter()) {
                *o += *v;
            }
        }

        self.master.prune_before(time);
        let master = &mut self.master_buffer[..out.len()];
        self.master.render(master, time, self.sample_rate);
        for (o, g) in out.iter_mut().zip(master.iter()) {
            *o *= *g;
        }

        self.voices.retain(|voice| !voice.is_finished());
        self.clock.advance(out.len());
    }

    fn find_voice(&mut self, id: VoiceId) -> Option<&mut Voice> {
        self.voices.iter_mut().find(|v| v.id() == id)
    }
}

/// Offline use: the engine is its own sink and renders on the caller's thread.
impl AudioSink for Engine {
    fn now(&self) -> f64 {
        self.clock.now()
    }

    fn add_voice(&mut self, voice: Voice) {
        self.apply(EngineCommand::AddVoice(Box::new(voice)));
    }

    fn schedule(&mut self, voice: VoiceId, event: ParamEvent) {
        self.apply(EngineCommand::Schedule { voice, event });
    }

    fn stop_voice(&mut self, voice: VoiceId, at: f64) {
        self.apply(EngineCommand::StopVoice { voice, at });
    }

    fn release_voice(&mut self, voice: VoiceId, release: VoiceRelease) {
        self.apply(EngineCommand::Release { voice, release });
    }

    fn set_master_volume(&mut self, volume: f32, at: f64) {
        self.apply(EngineCommand::MasterVolume { volume, at });
    }
}
