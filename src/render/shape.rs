use crate::{
    geometry::ArcPath,
    style::LineCap,
    timeline::StrokeAnimation,
};
use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{Angle, DrawTarget, Point, Primitive},
    primitives::{Arc, Circle, PrimitiveStyle},
    Drawable,
};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
struct RunningAnimation {
    animation: StrokeAnimation,
    added: Instant,
}

impl RunningAnimation {
    fn value_at(&self, now: Instant) -> Option<f32> {
        let elapsed = now.saturating_duration_since(self.added).as_secs_f32();
        self.animation.value_at(elapsed)
    }
}

/// A stroked arc. The view keeps one of these for the background track, one
/// for the progress and one per extra segment; they share the path and only
/// differ in styling and stroke range.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeLayer {
    path: Option<ArcPath>,
    stroke_start: f32,
    stroke_end: f32,
    stroke_color: Rgb888,
    line_width: f32,
    line_cap: LineCap,
    /// Rotation about the path center in radians, clockwise.
    rotation: f32,
    animation: Option<RunningAnimation>,
}

impl ShapeLayer {
    pub fn new(stroke_color: Rgb888) -> Self {
        Self {
            path: None,
            stroke_start: 0.0,
            stroke_end: 1.0,
            stroke_color,
            line_width: 1.0,
            line_cap: LineCap::default(),
            rotation: 0.0,
            animation: None,
        }
    }

    pub fn path(&self) -> Option<&ArcPath> {
        self.path.as_ref()
    }

    pub fn set_path(&mut self, path: ArcPath) {
        self.path = Some(path);
    }

    pub fn stroke_start(&self) -> f32 {
        self.stroke_start
    }

    pub fn set_stroke_start(&mut self, stroke_start: f32) {
        self.stroke_start = stroke_start;
    }

    /// The model value of the stroke end, ignoring running animations.
    pub fn stroke_end(&self) -> f32 {
        self.stroke_end
    }

    pub fn set_stroke_end(&mut self, stroke_end: f32) {
        self.stroke_end = stroke_end;
    }

    pub fn stroke_color(&self) -> Rgb888 {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Rgb888) {
        self.stroke_color = color;
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        self.line_width = line_width;
    }

    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    pub fn set_line_cap(&mut self, line_cap: LineCap) {
        self.line_cap = line_cap;
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
    }

    /// Attaches an animation of the stroke end, replacing the previous one.
    pub fn add_animation(&mut self, animation: StrokeAnimation, now: Instant) {
        self.animation = Some(RunningAnimation {
            animation,
            added: now,
        });
    }

    pub fn remove_animation(&mut self) {
        self.animation = None;
    }

    pub fn animation(&self) -> Option<&StrokeAnimation> {
        self.animation.as_ref().map(|running| &running.animation)
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.animation
            .as_ref()
            .map_or(false, |running| running.value_at(now).is_some())
    }

    /// The stroke end as it is currently shown.
    pub fn presentation_stroke_end(&self, now: Instant) -> f32 {
        self.animation
            .as_ref()
            .and_then(|running| running.value_at(now))
            .unwrap_or(self.stroke_end)
    }

    /// Start angle and signed sweep of the visible stroke, rotation included.
    pub fn visible_arc(&self, now: Instant) -> Option<(f32, f32)> {
        let path = self.path.as_ref()?;
        let (start, sweep) = path.sub_arc(self.stroke_start, self.presentation_stroke_end(now))?;
        Some((start + self.rotation, sweep))
    }

    pub fn draw_at<D: DrawTarget<Color = Rgb888>>(
        &self,
        now: Instant,
        target: &mut D,
    ) -> Result<(), D::Error> {
        let width = self.line_width.round();
        let (path, (start, sweep)) = match (self.path.as_ref(), self.visible_arc(now)) {
            (Some(path), Some(arc)) if width >= 1.0 => (path, arc),
            _ => return Ok(()),
        };
        let width = width as u32;
        let style = PrimitiveStyle::with_stroke(self.stroke_color, width);

        let (start, sweep) = match self.line_cap {
            LineCap::Square if path.radius > 0.0 => {
                let extension = (width as f32 / 2.0 / path.radius).copysign(sweep);
                (start - extension, sweep + 2.0 * extension)
            }
            _ => (start, sweep),
        };

        Arc::with_center(
            path.center(),
            path.diameter(),
            Angle::from_radians(start),
            Angle::from_radians(sweep),
        )
        .into_styled(style)
        .draw(target)?;

        if self.line_cap == LineCap::Round {
            let cap = PrimitiveStyle::with_fill(self.stroke_color);
            for angle in [start, start + sweep] {
                let (x, y) = path.point_at_angle(angle);
                Circle::with_center(Point::new(x.round() as i32, y.round() as i32), width)
                    .into_styled(cap)
                    .draw(target)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::{shape_rect, ArcPath},
        timeline::BasicAnimation,
    };
    use arc_hardware::FrameBuffer;
    use embedded_graphics::{geometry::Size, pixelcolor::RgbColor};
    use std::time::Duration;

    fn ring(size: u32, line_width: f32) -> ShapeLayer {
        let mut layer = ShapeLayer::new(Rgb888::WHITE);
        layer.set_line_width(line_width);
        layer.set_path(ArcPath::for_shape(
            shape_rect(Size::new(size, size), line_width),
            45.0,
            true,
        ));
        layer
    }

    #[test]
    fn presentation_value_follows_the_animation() {
        let now = Instant::now();
        let mut layer = ring(40, 4.0);
        layer.set_stroke_end(0.8);
        layer.add_animation(
            StrokeAnimation::Basic(BasicAnimation::new(0.0, 0.8, 1.0)),
            now,
        );

        let halfway = now + Duration::from_millis(500);
        assert!(layer.is_animating(halfway));
        assert!((layer.presentation_stroke_end(halfway) - 0.4).abs() < 1e-4);

        let done = now + Duration::from_secs(2);
        assert!(!layer.is_animating(done));
        assert_eq!(layer.presentation_stroke_end(done), 0.8);
    }

    #[test]
    fn gap_stays_dark() {
        let mut fb = FrameBuffer::new(Size::new(40, 40));
        ring(40, 4.0).draw_at(Instant::now(), &mut fb).unwrap();

        assert!(fb.lit_pixels() > 0);
        // The top of the ring is drawn, the bottom is the gap.
        assert_eq!(fb.pixel(Point::new(20, 2)), Some(Rgb888::WHITE));
        assert_eq!(fb.pixel(Point::new(20, 37)), Some(Rgb888::BLACK));
    }

    #[test]
    fn rotation_moves_the_gap() {
        let mut fb = FrameBuffer::new(Size::new(40, 40));
        let mut layer = ring(40, 4.0);
        layer.set_rotation(std::f32::consts::FRAC_PI_2);
        layer.draw_at(Instant::now(), &mut fb).unwrap();

        assert_eq!(fb.pixel(Point::new(2, 20)), Some(Rgb888::BLACK));
        assert_eq!(fb.pixel(Point::new(37, 20)), Some(Rgb888::WHITE));
    }

    #[test]
    fn empty_stroke_draws_nothing() {
        let mut fb = FrameBuffer::new(Size::new(40, 40));
        let mut layer = ring(40, 4.0);
        layer.set_stroke_start(0.5);
        layer.set_stroke_end(0.5);
        layer.draw_at(Instant::now(), &mut fb).unwrap();

        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn round_caps_add_pixels() {
        let draw = |cap| {
            let mut fb = FrameBuffer::new(Size::new(40, 40));
            let mut layer = ring(40, 6.0);
            layer.set_line_cap(cap);
            layer.set_stroke_end(0.5);
            layer.draw_at(Instant::now(), &mut fb).unwrap();
            fb.lit_pixels()
        };

        assert!(draw(LineCap::Round) > draw(LineCap::Butt));
        assert!(draw(LineCap::Square) > draw(LineCap::Butt));
    }
}
