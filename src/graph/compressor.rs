use crate::{
    dsp::compressor::{Compressor, CompressorSettings},
    graph::node::{GraphNode, RenderCtx},
};

/// In-place dynamics compression, meant for the end of a `through` chain.
pub struct CompressorNode {
    compressor: Compressor,
}

impl CompressorNode {
    pub fn new(settings: CompressorSettings) -> Self {
        Self {
            compressor: Compressor::new(settings),
        }
    }

    pub fn piano() -> Self {
        Self::new(CompressorSettings::PIANO)
    }

    pub fn reduction_db(&self) -> f32 {
        self.compressor.reduction_db()
    }
}

impl GraphNode for CompressorNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.compressor.render(out, ctx.sample_rate);
    }
}
