use crate::{
    dsp::filter::SVFilter,
    graph::node::{GraphNode, RenderCtx},
};

/*
Key-Tracked Low-Pass
====================

A lowpass filter whose cutoff follows the note being played: the cutoff is
`ratio × ctx.frequency`, recomputed at the start of every block.

The piano runs it at 8× the fundamental with Q = 0.5:

  gain
  1.0 ┤────────────·
      │             ·.
  0.5 ┤               ●   (-6 dB at the cutoff, no resonant bump)
      │                 ·.
  0.0 ┤                    ··.....
      └──┬───┬───┬───┬───┬───┬───┬──→ frequency
         f   2f  3f      5f      8f

The partials at f..5f pass almost untouched, while the upper harmonics of
the two triangle oscillators get rounded off, which keeps high notes from
sounding buzzy.
*/

pub struct FilterNode {
    filter: SVFilter,
    key_ratio: f32,
}

impl FilterNode {
    /// Lowpass with cutoff at `ratio` times the voice frequency.
    pub fn key_tracked(ratio: f32) -> Self {
        Self {
            filter: SVFilter::lowpass(ratio * 440.0, std::f32::consts::FRAC_1_SQRT_2),
            key_ratio: ratio,
        }
    }

    pub fn with_q(mut self, q: f32) -> Self {
        self.filter.q = q;
        self
    }

    pub fn cutoff_hz(&self) -> f32 {
        self.filter.cutoff_hz
    }

    pub fn q(&self) -> f32 {
        self.filter.q
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.set_cutoff(self.key_ratio * ctx.frequency);
        self.filter.render(out, ctx.sample_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_tracks_voice_frequency() {
        let mut node = FilterNode::key_tracked(8.0).with_q(0.5);
        let ctx = RenderCtx::from_freq(48_000.0, 261.63);
        let mut buffer = vec![0.0f32; 32];

        node.render_block(&mut buffer, &ctx);

        assert!((node.cutoff_hz() - 8.0 * 261.63).abs() < 1e-2);
        assert_eq!(node.q(), 0.5);
    }
}
