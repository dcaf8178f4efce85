//! Arc geometry shared by every shape layer of the view.
//!
//! Angles are in radians and follow screen conventions: `0` points to the
//! right and positive angles turn clockwise, which is also how
//! `embedded-graphics` measures them.
use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// An axis aligned rectangle with fractional coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The rectangle at the origin covering `size`.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width as f32, size.height as f32)
    }

    pub fn inset_by(self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.x + dx,
            self.y + dy,
            self.width - 2.0 * dx,
            self.height - 2.0 * dy,
        )
    }

    pub fn mid_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.mid_x().round() as i32, self.mid_y().round() as i32)
    }

    /// Rounds to the integer rectangle used for drawing.
    pub fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.x.round() as i32, self.y.round() as i32),
            Size::new(
                self.width.max(0.0).round() as u32,
                self.height.max(0.0).round() as u32,
            ),
        )
    }

    /// Linear interpolation between two rectangles.
    pub fn lerp(self, to: Self, t: f32) -> Self {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Self::new(
            mix(self.x, to.x),
            mix(self.y, to.y),
            mix(self.width, to.width),
            mix(self.height, to.height),
        )
    }
}

/// The rectangle the ring is drawn in: the bounds inset by half the line
/// width so the stroke stays inside the view.
pub fn shape_rect(bounds: Size, line_width: f32) -> RectF {
    RectF::from_size(bounds).inset_by(line_width / 2.0, line_width / 2.0)
}

/// Start and end angle of the ring for a gap of `space_degree` on either
/// side of the bottom point.
pub fn arc_angles(space_degree: f32, clockwise: bool) -> (f32, f32) {
    let near = space_degree * PI / 180.0 + FRAC_PI_2;
    let far = (360.0 - space_degree) * (PI / 180.0) + FRAC_PI_2;
    if clockwise {
        (near, far)
    } else {
        (far, near)
    }
}

/// A circular arc path. Every layer of the view shares one of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    pub clockwise: bool,
}

impl ArcPath {
    /// Builds the path of the ring inside `rect`. The radius follows the
    /// rectangle's width.
    pub fn for_shape(rect: RectF, space_degree: f32, clockwise: bool) -> Self {
        let (start_angle, end_angle) = arc_angles(space_degree, clockwise);
        Self {
            center_x: rect.mid_x(),
            center_y: rect.mid_y(),
            radius: rect.width / 2.0,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    /// Signed angle travelled from the start to the end angle. Clockwise
    /// paths move forward, counter-clockwise paths backward; a difference of
    /// a full turn or more is drawn as a full circle.
    pub fn sweep(&self) -> f32 {
        let diff = self.end_angle - self.start_angle;
        if self.clockwise {
            if diff >= TAU {
                TAU
            } else {
                diff.rem_euclid(TAU)
            }
        } else if -diff >= TAU {
            -TAU
        } else {
            -(-diff).rem_euclid(TAU)
        }
    }

    /// Length of the arc in degrees, without sign.
    pub fn span_degrees(&self) -> f32 {
        self.sweep().abs().to_degrees()
    }

    /// Angle at a stroke fraction along the path.
    pub fn angle_at(&self, fraction: f32) -> f32 {
        self.start_angle + self.sweep() * fraction
    }

    /// Point at `angle` on the circle.
    pub fn point_at_angle(&self, angle: f32) -> (f32, f32) {
        (
            self.center_x + self.radius * angle.cos(),
            self.center_y + self.radius * angle.sin(),
        )
    }

    /// The part of the path between two stroke fractions as
    /// `(start angle, signed sweep)`. Fractions are clamped to `[0, 1]` and an
    /// empty range yields `None`.
    pub fn sub_arc(&self, from: f32, to: f32) -> Option<(f32, f32)> {
        let from = from.clamp(0.0, 1.0);
        let to = to.clamp(0.0, 1.0);
        if to <= from {
            return None;
        }
        let sweep = self.sweep();
        Some((self.start_angle + sweep * from, sweep * (to - from)))
    }

    pub fn diameter(&self) -> u32 {
        (self.radius * 2.0).max(0.0).round() as u32
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x.round() as i32, self.center_y.round() as i32)
    }
}
