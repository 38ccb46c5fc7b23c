use crate::dsp::automation::ParamEvent;

/// Context passed to graph nodes during rendering
///
/// Contains information about what to render:
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - frequency: Fundamental of the voice being rendered (Hz)
/// - time: Audio-clock time of the first sample in the block, in seconds
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frequency: f32,
    pub time: f64,
}

impl RenderCtx {
    pub fn from_freq(sample_rate: f32, frequency: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            time: 0.0,
        }
    }

    /// Same context, starting at a different clock time.
    pub fn at(self, time: f64) -> Self {
        Self { time, ..self }
    }

    /// Clock time of sample `index` within the block.
    #[inline]
    pub fn time_of(&self, index: usize) -> f64 {
        self.time + index as f64 / self.sample_rate as f64
    }
}

/// Core trait for audio processing graph nodes
///
/// Nodes render audio block by block and react to scheduled control events.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Apply an automation event to whichever parameter this node exposes.
    ///
    /// Default implementation does nothing (passthrough nodes).
    fn schedule(&mut self, _event: &ParamEvent) {}

    /// Silence every generator from `time` onwards.
    ///
    /// Default implementation does nothing (processors have nothing to stop).
    fn stop_at(&mut self, _time: f64) {}

    /// Check if this node is still producing sound
    ///
    /// Used by the engine to know when a voice can be dropped.
    fn is_active(&self) -> bool {
        true
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn schedule(&mut self, event: &ParamEvent) {
        (**self).schedule(event)
    }

    fn stop_at(&mut self, time: f64) {
        (**self).stop_at(time)
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
