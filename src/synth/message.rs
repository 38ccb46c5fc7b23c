#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::{
    dsp::automation::ParamEvent,
    synth::voice::{Voice, VoiceId, VoiceRelease},
};

/// Control → audio thread messages.
pub enum EngineCommand {
    /// Start rendering a fully scheduled voice.
    AddVoice(Box<Voice>),
    Schedule { voice: VoiceId, event: ParamEvent },
    StopVoice { voice: VoiceId, at: f64 },
    /// Release gain events and the stop, applied together.
    Release { voice: VoiceId, release: VoiceRelease },
    MasterVolume { volume: f32, at: f64 },
}

impl EngineCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            EngineCommand::AddVoice(_) => "add-voice",
            EngineCommand::Schedule { .. } => "schedule",
            EngineCommand::StopVoice { .. } => "stop-voice",
            EngineCommand::Release { .. } => "release",
            EngineCommand::MasterVolume { .. } => "master-volume",
        }
    }
}

pub trait CommandReceiver {
    fn pop(&mut self) -> Option<EngineCommand>;
}

#[cfg(feature = "rtrb")]
impl CommandReceiver for Consumer<EngineCommand> {
    fn pop(&mut self) -> Option<EngineCommand> {
        Consumer::pop(self).ok()
    }
}

impl CommandReceiver for std::collections::VecDeque<EngineCommand> {
    fn pop(&mut self) -> Option<EngineCommand> {
        self.pop_front()
    }
}
