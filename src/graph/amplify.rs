use crate::{
    dsp::automation::ParamEvent,
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Multiply a signal by a modulator, sample by sample.
///
/// The voice uses it to apply its automated gain envelope to the partial
/// stack. Scheduled events and stops reach both sides.
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        // Slice temp buffer to match output size (RT-safe, no allocation)
        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.modulator.render_block(frames, ctx);

        for (o, m) in out.iter_mut().zip(frames.iter()) {
            *o *= *m;
        }
    }

    fn schedule(&mut self, event: &ParamEvent) {
        self.signal.schedule(event);
        self.modulator.schedule(event);
    }

    fn stop_at(&mut self, time: f64) {
        self.signal.stop_at(time);
        self.modulator.stop_at(time);
    }

    /// Silent once the signal side has stopped, whatever the modulator does.
    fn is_active(&self) -> bool {
        self.signal.is_active()
    }
}
