use embedded_graphics::pixelcolor::Rgb888;

/// A secondary band of the ring between two stroke fractions. It is drawn in
/// its own color on top of the background and never runs ahead of the
/// primary progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtraSegment {
    start: f32,
    end: f32,
    color: Rgb888,
}

impl ExtraSegment {
    /// `start` is raised to `0.0` and `end` lowered to `1.0` if they fall
    /// outside the ring.
    pub fn new(start: f32, end: f32, color: Rgb888) -> Self {
        Self {
            start: start.max(0.0),
            end: end.min(1.0),
            color,
        }
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn color(&self) -> Rgb888 {
        self.color
    }

    /// Stroke end the segment shows while the primary progress is at
    /// `progress`.
    pub fn drawn_end(&self, progress: f32) -> f32 {
        self.end.min(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn construction_clamps_to_the_ring() {
        let segment = ExtraSegment::new(-0.3, 1.5, Rgb888::RED);

        assert_eq!(segment.start(), 0.0);
        assert_eq!(segment.end(), 1.0);
    }

    #[test]
    fn inverted_bounds_are_kept() {
        let segment = ExtraSegment::new(0.7, 0.2, Rgb888::GREEN);

        assert_eq!((segment.start(), segment.end()), (0.7, 0.2));
    }

    #[test]
    fn drawn_end_follows_progress() {
        let segment = ExtraSegment::new(0.2, 0.6, Rgb888::GREEN);

        assert_eq!(segment.drawn_end(0.4), 0.4);
        assert_eq!(segment.drawn_end(0.9), 0.6);
    }
}
