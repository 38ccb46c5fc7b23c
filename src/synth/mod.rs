// Voice construction, the render engine and the control → audio boundary.
// This layer sits above graph nodes and below the session.

pub mod engine;
pub mod message;
pub mod registry;
pub mod sink;
pub mod voice;

pub use engine::{Clock, Engine};
pub use registry::VoiceRegistry;
pub use sink::AudioSink;
#[cfg(feature = "rtrb")]
pub use sink::{realtime, RealtimeEngine, RingSink};
pub use voice::{Release, Synthesizer, Voice, VoiceHandle, VoiceId, VoiceRelease};
