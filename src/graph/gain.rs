use crate::{
    dsp::automation::{ParamEvent, ParamTimeline},
    graph::node::{GraphNode, RenderCtx},
};

/// A gain parameter driven by scheduled automation.
///
/// Renders the timeline's value for every sample in the block, so it is meant
/// to sit on the modulator side of an `Amplify`:
///
/// ```ignore
/// let voice = Partials::piano(&mix).amplify(AutomatedGain::new(0.0));
/// ```
pub struct AutomatedGain {
    timeline: ParamTimeline,
}

impl AutomatedGain {
    pub fn new(initial: f32) -> Self {
        Self {
            timeline: ParamTimeline::new(initial),
        }
    }

    pub fn timeline(&self) -> &ParamTimeline {
        &self.timeline
    }
}

impl GraphNode for AutomatedGain {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.timeline.prune_before(ctx.time);
        self.timeline.render(out, ctx.time, ctx.sample_rate);
    }

    fn schedule(&mut self, event: &ParamEvent) {
        self.timeline.apply(*event);
    }
}
