//! Stroke animations as plain values.
//!
//! Nothing in here knows about layers or drawing: a [`Timeline`] describes
//! how the primary stroke and every extra segment move over time and can be
//! sampled at any offset from its start.
use crate::segment::ExtraSegment;
use log::trace;

/// Easing applied to the normalized time of an animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Linear,
    /// A damped spring settling at `1.0` when the animation ends. `damping`
    /// is the damping ratio, `1.0` being critically damped.
    Spring { damping: f32 },
}

impl Curve {
    /// Envelope decay over the whole animation, `e^-6.9` is about 0.1%.
    const SETTLE: f32 = 6.9;

    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            _ if t >= 1.0 => 1.0,
            Curve::Spring { damping } if damping >= 1.0 => {
                let omega = Self::SETTLE;
                1.0 - (-omega * t).exp() * (1.0 + omega * t)
            }
            Curve::Spring { damping } => {
                let zeta = damping.max(0.05);
                let omega = Self::SETTLE / zeta;
                let damped = omega * (1.0 - zeta * zeta).sqrt();
                let envelope = (-zeta * omega * t).exp();
                1.0 - envelope
                    * ((damped * t).cos() + zeta * omega / damped * (damped * t).sin())
            }
        }
    }
}

/// Linear interpolation of a stroke fraction, `begin` and `duration` in
/// seconds relative to the enclosing animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicAnimation {
    pub begin: f32,
    pub duration: f32,
    pub from: f32,
    pub to: f32,
}

impl BasicAnimation {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            begin: 0.0,
            duration,
            from,
            to,
        }
    }

    /// Keeps `value` constant for `duration` seconds starting at `begin`.
    pub fn hold(value: f32, begin: f32, duration: f32) -> Self {
        Self {
            begin,
            duration,
            from: value,
            to: value,
        }
    }

    pub fn end(&self) -> f32 {
        self.begin + self.duration
    }

    pub fn value_at(&self, t: f32) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let progress = ((t - self.begin) / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * progress
    }
}

/// Phases run back to back inside a fixed duration. At any time the latest
/// phase that has begun decides the value.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationGroup {
    pub duration: f32,
    pub animations: Vec<BasicAnimation>,
}

impl AnimationGroup {
    pub fn value_at(&self, t: f32) -> Option<f32> {
        if !(0.0..self.duration).contains(&t) {
            return None;
        }
        self.animations
            .iter()
            .rev()
            .find(|animation| animation.begin <= t)
            .map(|animation| animation.value_at(t))
    }

    /// The intro phase of a segment group.
    pub fn intro(&self) -> Option<&BasicAnimation> {
        self.animations.first()
    }

    /// The phase that actually moves a segment group.
    pub fn active(&self) -> Option<&BasicAnimation> {
        self.animations.get(1)
    }

    pub fn outro(&self) -> Option<&BasicAnimation> {
        self.animations.get(2)
    }
}

/// An animation attached to the stroke end of a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum StrokeAnimation {
    Basic(BasicAnimation),
    Group(AnimationGroup),
}

impl StrokeAnimation {
    pub fn duration(&self) -> f32 {
        match self {
            StrokeAnimation::Basic(animation) => animation.end(),
            StrokeAnimation::Group(group) => group.duration,
        }
    }

    /// Value `t` seconds after the animation was added, or `None` once it
    /// has finished.
    pub fn value_at(&self, t: f32) -> Option<f32> {
        match self {
            StrokeAnimation::Basic(animation) => {
                (0.0..animation.end()).contains(&t).then(|| animation.value_at(t))
            }
            StrokeAnimation::Group(group) => group.value_at(t),
        }
    }
}

/// Everything that moves when the progress changes from `start` to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub duration: f32,
    pub primary: BasicAnimation,
    /// One group per extra segment, in segment order.
    pub segments: Vec<AnimationGroup>,
}

/// Builds the animations for a progress change. `rate` is the time in
/// seconds the primary stroke needs to travel the whole ring.
pub fn build_timeline(start: f32, target: f32, segments: &[ExtraSegment], rate: f32) -> Timeline {
    let duration = (target - start).abs() * rate;
    trace!(
        "Building timeline from {} to {} over {}s for {} segments",
        start,
        target,
        duration,
        segments.len()
    );

    Timeline {
        duration,
        primary: BasicAnimation::new(start, target, duration),
        segments: segments
            .iter()
            .map(|segment| segment_phases(start, target, segment, rate, duration))
            .collect(),
    }
}

/// The three phases of one segment: wait until the primary stroke reaches
/// the segment, follow it across the segment, then hold until `duration`.
pub fn segment_phases(
    start: f32,
    target: f32,
    segment: &ExtraSegment,
    rate: f32,
    duration: f32,
) -> AnimationGroup {
    let (low, high) = (segment.start(), segment.end());

    let intro_duration = (low - start).max(start - high).max(0.0) * rate;
    let intro = BasicAnimation::hold(start.min(high), 0.0, intro_duration);

    let from = start.max(low).min(high);
    let to = target.min(high).max(low);
    let active = BasicAnimation {
        begin: intro.duration,
        duration: (to - from).abs() * rate,
        from,
        to,
    };

    let outro_begin = active.end();
    let outro = BasicAnimation::hold(to, outro_begin, (duration - outro_begin).max(0.0));

    AnimationGroup {
        duration,
        animations: vec![intro, active, outro],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

    const EPSILON: f32 = 1e-5;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn segment_waits_follows_and_holds() {
        let segment = ExtraSegment::new(0.2, 0.6, Rgb888::GREEN);
        let timeline = build_timeline(0.0, 1.0, &[segment], 1.0);
        let group = &timeline.segments[0];

        assert!(close(timeline.duration, 1.0));
        assert!(close(group.duration, timeline.primary.duration));

        let intro = group.intro().unwrap();
        assert!(close(intro.duration, 0.2));
        assert!(intro.from <= 0.2 && intro.to <= 0.2);

        let active = group.active().unwrap();
        assert!(close(active.begin, 0.2));
        assert!(close(active.duration, 0.4));
        assert_eq!((active.from, active.to), (0.2, 0.6));

        let outro = group.outro().unwrap();
        assert!(close(outro.begin, 0.6));
        assert!(close(outro.duration, 0.4));
        assert_eq!((outro.from, outro.to), (0.6, 0.6));

        assert!(close(group.value_at(0.1).unwrap(), 0.0));
        assert!(close(group.value_at(0.4).unwrap(), 0.4));
        assert!(close(group.value_at(0.9).unwrap(), 0.6));
        assert_eq!(group.value_at(1.0), None);
    }

    #[test]
    fn segment_tracks_the_primary_stroke_inside_its_range() {
        let segment = ExtraSegment::new(0.25, 0.75, Rgb888::GREEN);
        let timeline = build_timeline(0.1, 0.9, &[segment], 0.7);
        let group = &timeline.segments[0];

        for step in 0..20 {
            let t = timeline.duration * step as f32 / 20.0;
            let primary = timeline.primary.value_at(t);
            let value = group.value_at(t).unwrap();
            let expected = if primary < 0.25 { 0.1 } else { primary.min(0.75) };
            assert!((value - expected).abs() < 1e-4, "t = {}: {} != {}", t, value, expected);
        }
    }

    #[test]
    fn decreasing_progress_waits_above_the_segment() {
        let segment = ExtraSegment::new(0.2, 0.4, Rgb888::GREEN);
        let timeline = build_timeline(0.8, 0.0, &[segment], 1.0);
        let group = &timeline.segments[0];

        let intro = group.intro().unwrap();
        assert!(close(intro.duration, 0.4));
        assert_eq!(intro.from, 0.4);

        let active = group.active().unwrap();
        assert_eq!((active.from, active.to), (0.4, 0.2));
        assert!(close(group.value_at(0.5).unwrap(), 0.3));
        assert!(close(group.value_at(0.7).unwrap(), 0.2));
    }

    #[test]
    fn segment_out_of_reach_only_holds() {
        let segment = ExtraSegment::new(0.5, 0.8, Rgb888::GREEN);
        let timeline = build_timeline(0.0, 0.3, &[segment], 1.0);
        let group = &timeline.segments[0];

        assert!(close(group.duration, 0.3));
        assert_eq!(group.outro().unwrap().duration, 0.0);
        assert!(close(group.value_at(0.29).unwrap(), 0.0));
    }

    #[test]
    fn no_movement_means_no_animation() {
        let timeline = build_timeline(0.4, 0.4, &[], 0.7);

        assert_eq!(timeline.duration, 0.0);
        assert_eq!(StrokeAnimation::Basic(timeline.primary).value_at(0.0), None);
    }

    #[test]
    fn basic_animation_is_linear() {
        let animation = StrokeAnimation::Basic(BasicAnimation::new(0.2, 0.6, 2.0));

        assert!(close(animation.value_at(1.0).unwrap(), 0.4));
        assert!(close(animation.value_at(0.0).unwrap(), 0.2));
        assert_eq!(animation.value_at(2.0), None);
        assert_eq!(animation.value_at(-0.1), None);
    }

    #[test]
    fn spring_settles_at_the_target() {
        let spring = Curve::Spring { damping: 0.9 };

        assert_eq!(spring.apply(0.0), 0.0);
        assert_eq!(spring.apply(1.0), 1.0);
        assert!(spring.apply(0.5) > 0.9);
        assert!(spring.apply(0.25) > Curve::Linear.apply(0.25));
    }
}
