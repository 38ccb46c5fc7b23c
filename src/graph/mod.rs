//! Composable building blocks for constructing audio-processing graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with what a voice needs:
//! block rendering against an audio clock, scheduled parameter automation and
//! sample-accurate stops. The `extensions` module adds fluent helpers so a
//! voice can be written as one chain.

/// Multiply two signals together (amplitude control).
pub mod amplify;
/// Soft-knee compressor node.
pub mod compressor;
/// Fluent combinators (`.amplify()`, `.through()`).
pub mod extensions;
/// Key-tracked low-pass filter node.
pub mod filter;
/// Automation-driven gain stage.
pub mod gain;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators.
pub mod oscillator;
/// Fixed-level stack of oscillators.
pub mod partials;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use extensions::NodeExt;
pub use node::{GraphNode, RenderCtx};
