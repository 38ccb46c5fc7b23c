use crate::{
    dsp::automation::ParamEvent,
    graph::node::{GraphNode, RenderCtx},
};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series, passing the output of the first (source)
into the second (effect).

How It Works:
-------------
1. Render the source into the output buffer
2. Pass that buffer through the effect (in-place processing)

  Source renders:  [0.5, 0.8, -0.3, 0.9, ...]
  Effect processes in-place (e.g., lowpass)
  Final output:    [0.4, 0.6, -0.2, 0.7, ...]

The piano voice is two of them stacked:

     Partials::piano(&mix)
         .amplify(AutomatedGain::new(0.0))
         .through(FilterNode::key_tracked(8.0).with_q(0.5))
         .through(CompressorNode::piano())

Signal Flow Diagram:
--------------------
  Through: [Source] ──→ [Effect] ──→ output

  Amplify: [Signal] ──┬──→ (×) ──→ output
           [Mod]    ──┘

Control events (`schedule`, `stop_at`) are forwarded to both halves. A chain
counts as active while its source is: effects only ever process what the
source hands them, so once the oscillators are stopped the voice is done.
*/

pub struct Through<S, F> {
    source: S,
    effect: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, effect: F) -> Self {
        Self { source, effect }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn effect(&self) -> &F {
        &self.effect
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn schedule(&mut self, event: &ParamEvent) {
        self.source.schedule(event);
        self.effect.schedule(event);
    }

    fn stop_at(&mut self, time: f64) {
        self.source.stop_at(time);
        self.effect.stop_at(time);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}
