use crate::{
    graph::{
        node::{GraphNode, RenderCtx},
        oscillator::OscNode,
    },
    piano::profile::HarmonicMix,
    MAX_BLOCK_SIZE,
};

/*
Additive Partial Stack
======================

Several oscillators, each behind its own fixed gain, summed into one signal:

  [osc 1.000f] ──(×0.60)──┐
  [osc 2.000f] ──(×0.25)──┤
  [osc 3.000f] ──(×0.15)──┼──(+)──→ out
  [osc 5.000f] ──(×0.08)──┤
  [osc 1.002f] ──(×0.07)──┘

Levels are fixed for the life of the voice; loudness over time is shaped
downstream by an automated gain.
*/

pub struct Partials {
    partials: Vec<(OscNode, f32)>,
    temp_buffer: Vec<f32>,
}

impl Partials {
    pub fn new() -> Self {
        Self {
            partials: Vec::with_capacity(5),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Add an oscillator at a fixed level.
    pub fn with(mut self, osc: OscNode, level: f32) -> Self {
        self.partials.push((osc, level));
        self
    }

    /// The five-oscillator piano stack for a given harmonic mix.
    pub fn piano(mix: &HarmonicMix) -> Self {
        Self::new()
            .with(OscNode::triangle(), mix.fundamental)
            .with(OscNode::sine().with_ratio(2.0), mix.second)
            .with(OscNode::sine().with_ratio(3.0), mix.third)
            .with(OscNode::sine().with_ratio(5.0), mix.fifth)
            .with(OscNode::triangle().with_ratio(1.002), mix.detune)
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }

    /// (ratio, level) of every partial, in insertion order.
    pub fn layout(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.partials.iter().map(|(osc, level)| (osc.ratio(), *level))
    }
}

impl Default for Partials {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphNode for Partials {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        out.fill(0.0);
        let frames = &mut self.temp_buffer[..out.len()];

        for (osc, level) in &mut self.partials {
            osc.render_block(frames, ctx);
            for (o, s) in out.iter_mut().zip(frames.iter()) {
                *o += *s * *level;
            }
        }
    }

    fn stop_at(&mut self, time: f64) {
        for (osc, _) in &mut self.partials {
            osc.stop_at(time);
        }
    }

    fn is_active(&self) -> bool {
        self.partials.iter().any(|(osc, _)| osc.is_active())
    }
}
