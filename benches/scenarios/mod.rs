//! Real-world scenario benchmarks.
//!
//! These benchmarks model actual usage: one complete piano voice, and the
//! engine mixing a held chord under master volume.

mod voices;

pub use voices::bench_voices;
