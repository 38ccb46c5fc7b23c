#[cfg(feature = "rtrb")]
use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};
#[cfg(feature = "rtrb")]
use tracing::{debug, warn};

use crate::{
    dsp::automation::ParamEvent,
    synth::voice::{Voice, VoiceId, VoiceRelease},
};
#[cfg(feature = "rtrb")]
use crate::synth::{
    engine::{Clock, Engine},
    message::EngineCommand,
};

/// Where control-side operations send their audio work.
///
/// `now()` is the audio clock in seconds; every scheduled time is on that
/// clock. Implementations never block.
pub trait AudioSink {
    fn now(&self) -> f64;

    fn add_voice(&mut self, voice: Voice);

    fn schedule(&mut self, voice: VoiceId, event: ParamEvent);

    fn stop_voice(&mut self, voice: VoiceId, at: f64);

    fn set_master_volume(&mut self, volume: f32, at: f64);

    /// Fade a voice out and stop it. The release either lands whole or not
    /// at all; a voice is never left with half of it.
    fn release_voice(&mut self, voice: VoiceId, release: VoiceRelease) {
        for event in release.events() {
            self.schedule(voice, event);
        }
        self.stop_voice(voice, release.until);
    }

    /// Retry work held back by a busy audio side. Returns how much is
    /// still waiting.
    fn flush(&mut self) -> usize {
        0
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn now(&self) -> f64 {
        (**self).now()
    }

    fn add_voice(&mut self, voice: Voice) {
        (**self).add_voice(voice)
    }

    fn schedule(&mut self, voice: VoiceId, event: ParamEvent) {
        (**self).schedule(voice, event)
    }

    fn stop_voice(&mut self, voice: VoiceId, at: f64) {
        (**self).stop_voice(voice, at)
    }

    fn set_master_volume(&mut self, volume: f32, at: f64) {
        (**self).set_master_volume(volume, at)
    }

    fn release_voice(&mut self, voice: VoiceId, release: VoiceRelease) {
        (**self).release_voice(voice, release)
    }

    fn flush(&mut self) -> usize {
        (**self).flush()
    }
}

/// Control-thread end of a realtime engine.
///
/// Commands travel through a lock-free ring buffer; the clock is read from
/// the engine's shared frame counter.
///
/// When the queue is full, releases wait here in order and the latest
/// master volume replaces any older one still waiting. Both go out on the
/// next send or `flush`. New voices are dropped instead: a note that starts
/// late is worse than one that never starts.
#[cfg(feature = "rtrb")]
pub struct RingSink {
    tx: Producer<EngineCommand>,
    clock: Clock,
    pending: VecDeque<(VoiceId, VoiceRelease)>,
    pending_volume: Option<(f32, f64)>,
    dropped: u64,
}

#[cfg(feature = "rtrb")]
impl RingSink {
    fn send(&mut self, command: EngineCommand) {
        self.flush_pending();
        if let Err(rtrb::PushError::Full(command)) = self.tx.push(command) {
            self.dropped += 1;
            warn!(
                kind = command.kind(),
                dropped = self.dropped,
                "engine command queue full, dropping command"
            );
        }
    }

    fn flush_pending(&mut self) -> usize {
        while let Some(&(voice, release)) = self.pending.front() {
            if self.tx.push(EngineCommand::Release { voice, release }).is_err() {
                break;
            }
            self.pending.pop_front();
        }

        if self.pending.is_empty() {
            if let Some((volume, at)) = self.pending_volume {
                if self.tx.push(EngineCommand::MasterVolume { volume, at }).is_ok() {
                    self.pending_volume = None;
                }
            }
        }

        self.pending()
    }

    /// Commands lost to a full queue so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Commands held back until the queue has room.
    pub fn pending(&self) -> usize {
        self.pending.len() + usize::from(self.pending_volume.is_some())
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

#[cfg(feature = "rtrb")]
impl AudioSink for RingSink {
    fn now(&self) -> f64 {
        self.clock.now()
    }

    fn add_voice(&mut self, voice: Voice) {
        self.send(EngineCommand::AddVoice(Box::new(voice)));
    }

    fn schedule(&mut self, voice: VoiceId, event: ParamEvent) {
        self.send(EngineCommand::Schedule { voice, event });
    }

    fn stop_voice(&mut self, voice: VoiceId, at: f64) {
        self.send(EngineCommand::StopVoice { voice, at });
    }

    fn set_master_volume(&mut self, volume: f32, at: f64) {
        // Anything older is stale now
        self.pending_volume = Some((volume, at));
        self.flush_pending();
    }

    fn release_voice(&mut self, voice: VoiceId, release: VoiceRelease) {
        self.pending.push_back((voice, release));
        if self.flush_pending() > 0 {
            debug!(
                voice = voice.0,
                waiting = self.pending.len(),
                "engine command queue full, release deferred"
            );
        }
    }

    fn flush(&mut self) -> usize {
        self.flush_pending()
    }
}

/// Audio-thread end of a realtime engine. Move it into the device callback.
#[cfg(feature = "rtrb")]
pub struct RealtimeEngine {
    engine: Engine,
    rx: Consumer<EngineCommand>,
}

#[cfg(feature = "rtrb")]
impl RealtimeEngine {
    pub fn render(&mut self, out: &mut [f32]) {
        self.engine.render_from(&mut self.rx, out);
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

/// Build a connected (control, audio) pair.
#[cfg(feature = "rtrb")]
pub fn realtime(sample_rate: f32, master_volume: f32, capacity: usize) -> (RingSink, RealtimeEngine) {
    let engine = Engine::new(sample_rate, master_volume);
    let (tx, rx) = RingBuffer::new(capacity);

    let sink = RingSink {
        tx,
        clock: engine.clock(),
        pending: VecDeque::new(),
        pending_volume: None,
        dropped: 0,
    };

    (sink, RealtimeEngine { engine, rx })
}
