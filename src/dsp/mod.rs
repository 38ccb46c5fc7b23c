//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so they can live directly inside voice structs. They stay focused on the
//! signal-processing math; graph nodes layer scheduling and routing on top.

/// Scheduled parameter automation (set / linear / exponential / cancel).
pub mod automation;
/// Soft-knee feed-forward compressor.
pub mod compressor;
/// State-variable low-pass filter.
pub mod filter;
/// Sine and triangle oscillators.
pub mod oscillator;

pub use automation::{ParamEvent, ParamTimeline};
pub use compressor::{Compressor, CompressorSettings};
pub use filter::SVFilter;
pub use oscillator::{OscillatorBlock, OscillatorWaveform};
