/*
Parameter Automation
====================

Instead of advancing an envelope state machine sample by sample, the control
side *schedules* where a parameter should be at given times, and the audio
side evaluates that schedule for each sample it renders. This is the model
used by audio-graph APIs: nothing sleeps, the future is a list of points.

Vocabulary
----------

  event       A point on the timeline: (time, value) plus how to get there.

  set         Jump to `value` at `time`. Holds until the next event.

  linear      Ramp in a straight line from the previous event's value to
              `value`, arriving exactly at `time`.

  exponential Ramp geometrically from the previous value to `value`. Equal
              time steps multiply the level by equal ratios, which sounds
              like a natural decay. Both ends must be positive and non-zero:
              a geometric ramp can never reach 0, which is why releases aim
              at a small floor such as 0.001 (-60 dB).

  cancel      Drop every event at or after a time.


The Shape
---------

  set(0, t0)  linear(0.8, t1)   exp(0.5, t2)   exp(0.3, t3)

  0.8 ┤      ●
      │     ╱ ╲
  0.5 ┤    ╱   ╲●
      │   ╱      ╲___
  0.3 ┤  ╱           ●──────────  (holds after the last event)
    0 ●─╱
      t0  t1     t2      t3


The Math
--------

For a time t between the previous event (T0, V0) and a ramp event (T1, V1):

    linear:       v(t) = V0 + (V1 - V0) * (t - T0) / (T1 - T0)
    exponential:  v(t) = V0 * (V1 / V0) ^ ((t - T0) / (T1 - T0))

If V0 and V1 do not share a sign (or either is zero) an exponential ramp
cannot be computed; the value holds at V0 until T1.


Splicing a Release
------------------

Stopping a note in the middle of a ramp must not click. The recipe:

    let v = timeline.value_at(now);   // interpolated, NOT the last setpoint
    timeline.cancel(now);             // forget the rest of attack/decay
    timeline.set(v, now);             // pin the current level
    timeline.exponential(0.001, now + release);

Reading the value *before* cancelling matters: once the in-flight ramp's
endpoint is gone, the timeline would fall back to the previous setpoint and
the release would start from the wrong level.

    0.8 ┤     ╱ ← cancelled part of the attack
        │    ╱
    0.4 ┤   ●╲        release starts exactly where the attack was
        │  ╱   ╲___
      0 ●─╱        ╲___________
         t0 now        now+release
*/

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamEvent {
    Set { value: f32, time: f64 },
    LinearRamp { value: f32, time: f64 },
    ExponentialRamp { value: f32, time: f64 },
    /// Remove every scheduled event with `time >= from`.
    Cancel { from: f64 },
}

impl ParamEvent {
    pub fn time(&self) -> f64 {
        match *self {
            ParamEvent::Set { time, .. }
            | ParamEvent::LinearRamp { time, .. }
            | ParamEvent::ExponentialRamp { time, .. } => time,
            ParamEvent::Cancel { from } => from,
        }
    }

    fn value(&self) -> f32 {
        match *self {
            ParamEvent::Set { value, .. }
            | ParamEvent::LinearRamp { value, .. }
            | ParamEvent::ExponentialRamp { value, .. } => value,
            ParamEvent::Cancel { .. } => 0.0,
        }
    }
}

/// A single automatable parameter: a default value plus a time-ordered list
/// of scheduled events.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamTimeline {
    default_value: f32,
    events: Vec<ParamEvent>,
}

impl ParamTimeline {
    pub fn new(default_value: f32) -> Self {
        Self {
            default_value,
            events: Vec::with_capacity(8),
        }
    }

    pub fn set_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(ParamEvent::Set { value, time });
    }

    pub fn linear_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(ParamEvent::LinearRamp { value, time });
    }

    pub fn exponential_ramp_to_value_at_time(&mut self, value: f32, time: f64) {
        self.insert(ParamEvent::ExponentialRamp { value, time });
    }

    pub fn cancel_scheduled_values(&mut self, from: f64) {
        self.events.retain(|event| event.time() < from);
    }

    /// Apply one event, whichever kind it is.
    pub fn apply(&mut self, event: ParamEvent) {
        match event {
            ParamEvent::Cancel { from } => self.cancel_scheduled_values(from),
            other => self.insert(other),
        }
    }

    /// Events sharing a timestamp keep their scheduling order.
    fn insert(&mut self, event: ParamEvent) {
        let time = event.time();
        let index = self.events.partition_point(|e| e.time() <= time);
        self.events.insert(index, event);
    }

    /// Evaluate the timeline at `time` (seconds).
    pub fn value_at(&self, time: f64) -> f32 {
        let mut prev_value = self.default_value;
        let mut prev_time = 0.0_f64;

        for event in &self.events {
            let event_time = event.time();

            if event_time <= time {
                prev_value = event.value();
                prev_time = event_time;
                continue;
            }

            // First event still in the future: are we inside its ramp?
            return match *event {
                ParamEvent::LinearRamp { value, time: end } => {
                    let span = end - prev_time;
                    if span <= 0.0 {
                        value
                    } else {
                        let progress = ((time - prev_time) / span).clamp(0.0, 1.0) as f32;
                        prev_value + (value - prev_value) * progress
                    }
                }
                ParamEvent::ExponentialRamp { value, time: end } => {
                    let span = end - prev_time;
                    if prev_value * value <= 0.0 {
                        prev_value
                    } else if span <= 0.0 {
                        value
                    } else {
                        let progress = ((time - prev_time) / span).clamp(0.0, 1.0) as f32;
                        prev_value * (value / prev_value).powf(progress)
                    }
                }
                _ => prev_value,
            };
        }

        prev_value
    }

    /// Fill `out` with one value per sample, starting at `start_time`.
    pub fn render(&self, out: &mut [f32], start_time: f64, sample_rate: f32) {
        let sr = sample_rate as f64;
        for (i, sample) in out.iter_mut().enumerate() {
            *sample = self.value_at(start_time + i as f64 / sr);
        }
    }

    /// Forget events that can no longer shape the curve from `time` on.
    ///
    /// Only the last event at or before `time` is kept, since it supplies the
    /// start point of whatever follows. Values at or after `time` are
    /// unchanged; earlier values are not. Removal shifts in place, so this is
    /// safe to call on the audio thread.
    pub fn prune_before(&mut self, time: f64) {
        let passed = self.events.partition_point(|e| e.time() <= time);
        if passed > 1 {
            self.events.drain(..passed - 1);
        }
    }

    /// Time of the last scheduled event, if any.
    pub fn end_time(&self) -> Option<f64> {
        self.events.last().map(ParamEvent::time)
    }

    pub fn events(&self) -> &[ParamEvent] {
        &self.events
    }
}

impl Default for ParamTimeline {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn default_value_before_any_event() {
        let timeline = ParamTimeline::new(0.7);
        assert!(close(timeline.value_at(0.0), 0.7));
        assert!(close(timeline.value_at(12.0), 0.7));
    }

    #[test]
    fn set_value_holds_until_next_event() {
        let mut timeline = ParamTimeline::new(1.0);
        timeline.set_value_at_time(0.25, 1.0);
        timeline.set_value_at_time(0.5, 2.0);

        assert!(close(timeline.value_at(0.5), 1.0));
        assert!(close(timeline.value_at(1.0), 0.25));
        assert!(close(timeline.value_at(1.99), 0.25));
        assert!(close(timeline.value_at(2.5), 0.5));
    }

    #[test]
    fn linear_ramp_interpolates_from_previous_event() {
        let mut timeline = ParamTimeline::new(1.0);
        timeline.set_value_at_time(0.0, 1.0);
        timeline.linear_ramp_to_value_at_time(0.8, 1.1);

        assert!(close(timeline.value_at(1.05), 0.4));
        assert!(close(timeline.value_at(1.1), 0.8));
        assert!(close(timeline.value_at(3.0), 0.8));
    }

    #[test]
    fn exponential_ramp_is_geometric() {
        let mut timeline = ParamTimeline::new(1.0);
        timeline.set_value_at_time(0.8, 0.0);
        timeline.exponential_ramp_to_value_at_time(0.2, 1.0);

        // halfway: sqrt(0.8 * 0.2)
        assert!(close(timeline.value_at(0.5), 0.4));
        assert!(close(timeline.value_at(1.0), 0.2));
    }

    #[test]
    fn exponential_ramp_from_zero_holds() {
        let mut timeline = ParamTimeline::new(1.0);
        timeline.set_value_at_time(0.0, 0.0);
        timeline.exponential_ramp_to_value_at_time(0.5, 1.0);

        assert_eq!(timeline.value_at(0.5), 0.0);
        assert!(close(timeline.value_at(1.0), 0.5));
    }

    #[test]
    fn ramp_chain_starts_from_previous_ramp_end() {
        let mut timeline = ParamTimeline::new(1.0);
        timeline.set_value_at_time(0.0, 0.0);
        timeline.linear_ramp_to_value_at_time(1.0, 1.0);
        timeline.exponential_ramp_to_value_at_time(0.25, 3.0);

        // one second into the exponential segment: 1.0 * 0.25^(1/2)
        assert!(close(timeline.value_at(2.0), 0.5));
    }

    #[test]
    fn cancel_drops_events_at_and_after_time() {
        let mut timeline = ParamTimeline::new(1.0);
        timeline.set_value_at_time(0.0, 0.0);
        timeline.linear_ramp_to_value_at_time(1.0, 1.0);
        timeline.set_value_at_time(0.3, 2.0);

        timeline.cancel_scheduled_values(1.0);
        assert_eq!(timeline.events().len(), 1);
        assert_eq!(timeline.value_at(5.0), 0.0);
    }

    #[test]
    fn splice_continues_from_interpolated_value() {
        let mut timeline = ParamTimeline::new(1.0);
        timeline.set_value_at_time(0.0, 0.0);
        timeline.linear_ramp_to_value_at_time(0.8, 0.1);
        timeline.exponential_ramp_to_value_at_time(0.4, 0.3);

        // stop halfway through the attack
        let now = 0.05;
        let current = timeline.value_at(now);
        assert!(close(current, 0.4));

        timeline.apply(ParamEvent::Cancel { from: now });
        timeline.apply(ParamEvent::Set { value: current, time: now });
        timeline.apply(ParamEvent::ExponentialRamp { value: 0.001, time: now + 0.3 });

        assert!(close(timeline.value_at(now), current));
        assert!(close(timeline.value_at(now + 0.000_01), current));
        assert!(timeline.value_at(now + 0.15) < current);
        assert!(close(timeline.value_at(now + 0.3), 0.001));
    }

    #[test]
    fn events_with_equal_times_keep_order() {
        let mut timeline = ParamTimeline::new(1.0);
        timeline.set_value_at_time(0.1, 1.0);
        timeline.set_value_at_time(0.9, 1.0);

        assert!(close(timeline.value_at(1.0), 0.9));
    }

    #[test]
    fn render_samples_the_curve() {
        let mut timeline = ParamTimeline::new(0.0);
        timeline.set_value_at_time(0.0, 0.0);
        timeline.linear_ramp_to_value_at_time(1.0, 1.0);

        let mut buffer = [0.0f32; 5];
        timeline.render(&mut buffer, 0.0, 4.0);
        assert!(close(buffer[0], 0.0));
        assert!(close(buffer[2], 0.5));
        assert!(close(buffer[4], 1.0));
    }

    #[test]
    fn pruning_keeps_the_curve_ahead() {
        let mut timeline = ParamTimeline::new(0.0);
        timeline.set_value_at_time(0.0, 0.0);
        timeline.linear_ramp_to_value_at_time(0.8, 0.01);
        timeline.exponential_ramp_to_value_at_time(0.5, 0.11);
        timeline.exponential_ramp_to_value_at_time(0.3, 0.36);

        let sample_times = [0.05, 0.11, 0.2, 0.36, 1.0];
        let before: Vec<f32> = sample_times.iter().map(|&t| timeline.value_at(t)).collect();

        timeline.prune_before(0.05);
        assert_eq!(timeline.events().len(), 3);
        let after: Vec<f32> = sample_times.iter().map(|&t| timeline.value_at(t)).collect();
        assert_eq!(before, after);

        timeline.prune_before(2.0);
        assert_eq!(timeline.events().len(), 1);
        assert!(close(timeline.value_at(2.0), 0.3));
    }

    #[test]
    fn repeated_sets_stay_bounded_when_pruned() {
        let mut timeline = ParamTimeline::new(0.7);
        for i in 0..1000 {
            let now = i as f64 * 0.01;
            timeline.apply(ParamEvent::Cancel { from: now });
            timeline.apply(ParamEvent::Set {
                value: (i % 10) as f32 / 10.0,
                time: now,
            });
            timeline.prune_before(now);
        }

        assert_eq!(timeline.events().len(), 1);
        assert!(close(timeline.value_at(100.0), 0.9));
    }
}
