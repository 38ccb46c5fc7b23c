use crate::dsp::oscillator::OscillatorBlock;
use crate::graph::node::{GraphNode, RenderCtx};

/*
Audio Oscillator
================

The sound source of every voice. Each oscillator runs at a fixed multiple of
the voice fundamental (`ctx.frequency`), so a handful of them stacked with
different ratios builds an additive tone.

Waveforms used by the piano:

Sine: a single frequency, no overtones.
  - Used for the 2nd, 3rd and 5th partials, where each oscillator should
    contribute exactly one spectral line.

Triangle: odd harmonics falling off as 1/n².
  - Soft, slightly hollow. Used for the fundamental and its detuned twin so
    the body of the note has a little more than a pure sine.

Ratios and what they sound like over a fundamental f:

  1.000 f   fundamental
  2.000 f   octave
  3.000 f   octave + fifth
  5.000 f   two octaves + major third
  1.002 f   ~3.5 cents sharp; beats slowly against the fundamental,
            like the slightly mistuned strings of a real piano unison

Stopping
--------
`stop_at(t)` is sample-accurate: every sample whose clock time is at or after
`t` is zero, and the node reports inactive once a block has passed `t`.
*/

pub struct OscNode {
    osc: OscillatorBlock,
    /// Multiple of ctx.frequency this oscillator plays at.
    ratio: f32,
    stop_time: Option<f64>,
    finished: bool,
}

impl OscNode {
    fn new(osc: OscillatorBlock) -> Self {
        Self {
            osc,
            ratio: 1.0,
            stop_time: None,
            finished: false,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorBlock::sine())
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorBlock::triangle())
    }

    /// Play at `ratio` times the voice frequency.
    pub fn with_ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if self.finished {
            out.fill(0.0);
            return;
        }

        let frequency = ctx.frequency * self.ratio;

        match self.stop_time {
            None => self.osc.render(out, frequency, ctx.sample_rate),
            Some(stop) => {
                for (i, sample) in out.iter_mut().enumerate() {
                    *sample = if ctx.time_of(i) >= stop {
                        0.0
                    } else {
                        self.osc.next_sample(frequency, ctx.sample_rate)
                    };
                }
                if ctx.time_of(out.len()) >= stop {
                    self.finished = true;
                }
            }
        }
    }

    fn stop_at(&mut self, time: f64) {
        self.stop_time = Some(time);
    }

    fn is_active(&self) -> bool {
        !self.finished
    }
}
