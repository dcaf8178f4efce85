use crate::{
    clock::{Clock, SystemClock},
    description::ViewDescription,
    format::PercentFormat,
    geometry::{shape_rect, ArcPath, RectF},
    render::{
        label::{default_font, font_by_name, Label},
        shape::ShapeLayer,
    },
    segment::ExtraSegment,
    style::{LineCap, Orientation},
    timeline::{build_timeline, Curve, StrokeAnimation},
};
use anyhow::{Context, Result};
use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    geometry::Size,
    mono_font::MonoFont,
    pixelcolor::Rgb888,
    primitives::Rectangle,
    Drawable,
};
use log::debug;
use std::time::Duration;

/// Values a freshly created view starts with.
pub mod defaults {
    use embedded_graphics::{geometry::Size, pixelcolor::Rgb888};

    pub const SIZE: Size = Size::new(96, 96);
    pub const BACKGROUND_SHAPE_COLOR: Rgb888 = Rgb888::new(0xE6, 0xE6, 0xE6);
    pub const PROGRESS_SHAPE_COLOR: Rgb888 = Rgb888::new(0x00, 0x00, 0xFF);
    pub const LABEL_COLOR: Rgb888 = Rgb888::new(0xE6, 0xE6, 0xE6);
    pub const LINE_WIDTH: f32 = 8.0;
    pub const SPACE_DEGREE: f32 = 45.0;
    pub const PERCENT_LABEL_FORMAT: &str = "%.f %%";
    pub const FONT: &str = "6x13";
    pub const COMPLETE_DURATION: f32 = 0.7;
    pub const PROGRESS: f32 = 0.1;
}

const TITLE_LABEL_WIDTH: f32 = 100.0;
const TITLE_ANIMATION: Duration = Duration::from_millis(300);
const TITLE_SPRING: Curve = Curve::Spring { damping: 0.9 };

/// A circular progress ring with a gap, a percentage label in the middle and
/// an optional title in the gap.
#[derive(Debug)]
pub struct ArcProgressView {
    frame: Rectangle,
    clockwise: bool,
    background_shape_color: Rgb888,
    progress_shape_color: Rgb888,
    line_width: f32,
    space_degree: f32,
    inset: f32,
    percent_label_format: PercentFormat,
    percent_color: Rgb888,
    title: String,
    title_color: Rgb888,
    font: &'static MonoFont<'static>,
    orientation: Orientation,
    line_cap: LineCap,
    extra_progress: Vec<ExtraSegment>,
    complete_duration: f32,

    background_shape: ShapeLayer,
    progress_shape: ShapeLayer,
    /// One layer per entry of `extra_progress`, same order.
    extra_shapes: Vec<ShapeLayer>,
    percent_label: Label,
    title_label: Label,
    clock: Box<dyn Clock>,
}

impl ArcProgressView {
    pub fn new(frame: Rectangle) -> Self {
        let mut view = Self {
            frame,
            clockwise: true,
            background_shape_color: defaults::BACKGROUND_SHAPE_COLOR,
            progress_shape_color: defaults::PROGRESS_SHAPE_COLOR,
            line_width: defaults::LINE_WIDTH,
            space_degree: defaults::SPACE_DEGREE,
            inset: 0.0,
            percent_label_format: PercentFormat::default(),
            percent_color: defaults::LABEL_COLOR,
            title: String::new(),
            title_color: defaults::LABEL_COLOR,
            font: default_font(),
            orientation: Orientation::default(),
            line_cap: LineCap::default(),
            extra_progress: Vec::new(),
            complete_duration: defaults::COMPLETE_DURATION,
            background_shape: ShapeLayer::new(defaults::BACKGROUND_SHAPE_COLOR),
            progress_shape: ShapeLayer::new(defaults::PROGRESS_SHAPE_COLOR),
            extra_shapes: Vec::new(),
            percent_label: Label::new(defaults::LABEL_COLOR),
            title_label: Label::new(defaults::LABEL_COLOR),
            clock: Box::new(SystemClock),
        };
        view.setup();
        view
    }

    /// Builds a view from its serialized form.
    pub fn from_description(description: &ViewDescription) -> Result<Self> {
        let mut view = Self::new(description.frame.into());
        view.apply(description)?;
        Ok(view)
    }

    /// Replaces the time source animations are sampled with.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    fn setup(&mut self) {
        self.progress_shape.set_stroke_end(defaults::PROGRESS);

        let initial = PercentFormat::parse(PercentFormat::INITIAL)
            .map(|format| format.render(f64::from(defaults::PROGRESS) * 100.0))
            .unwrap_or_default();
        self.percent_label.set_text(initial);

        let size = self.frame.size;
        self.title_label.set_frame(RectF::new(
            (size.width as f32 - TITLE_LABEL_WIDTH) / 2.0,
            size.height as f32 - 21.0,
            TITLE_LABEL_WIDTH,
            21.0,
        ));

        self.layout();
    }

    /// Applies every field of `description`. Nothing is changed if the
    /// description names an unknown font or an invalid format.
    pub fn apply(&mut self, description: &ViewDescription) -> Result<()> {
        let format = PercentFormat::parse(&description.percent_label_format)
            .context("Invalid percent label format")?;
        let font = font_by_name(&description.font)?;

        self.frame = description.frame.into();
        self.clockwise = description.clockwise;
        self.background_shape_color = description.background_shape_color.into();
        self.progress_shape_color = description.progress_shape_color.into();
        self.line_width = description.line_width;
        self.space_degree = description.space_degree;
        self.inset = description.inset;
        self.percent_label_format = format;
        self.complete_duration = description.complete_duration;
        self.orientation = description.orientation;
        self.line_cap = description.line_cap;
        self.set_percent_color(description.percent_color.into());
        self.set_title(description.title.clone());
        self.set_title_color(description.title_color.into());
        self.set_font(font);

        self.set_extra_progress(description.extra_segments());
        self.set_progress(description.progress, false);
        // An ignored progress above 1.0 still shows the new format.
        self.refresh_percent_text();
        Ok(())
    }

    fn bounds(&self) -> Size {
        self.frame.size
    }

    fn title_frame(&self, orientation: Orientation) -> RectF {
        let size = self.bounds();
        let x = (size.width as f32 - TITLE_LABEL_WIDTH) / 2.0;
        match orientation {
            Orientation::Top => RectF::new(x, 0.0, TITLE_LABEL_WIDTH, 42.0),
            _ => RectF::new(x, size.height as f32 - 50.0, TITLE_LABEL_WIDTH, 42.0),
        }
    }

    fn shape_layers_mut(&mut self) -> impl Iterator<Item = &mut ShapeLayer> {
        std::iter::once(&mut self.background_shape)
            .chain(std::iter::once(&mut self.progress_shape))
            .chain(self.extra_shapes.iter_mut())
    }

    /// Recomputes the ring geometry from the current bounds, then restyles
    /// every layer.
    pub fn layout(&mut self) {
        let size = self.bounds();
        let path = ArcPath::for_shape(
            shape_rect(size, self.line_width),
            self.space_degree,
            self.clockwise,
        );
        debug!(
            "Laying out {}x{} view: radius {}, span {}°",
            size.width,
            size.height,
            path.radius,
            path.span_degrees()
        );

        for layer in self.shape_layers_mut() {
            layer.set_path(path);
        }

        self.percent_label.set_frame(RectF::from_size(size));
        let title_frame = self.title_frame(self.orientation);
        self.title_label.set_frame(title_frame);

        self.update_shapes();
    }

    /// Pushes the styling configuration into the layers and labels.
    pub fn update_shapes(&mut self) {
        let stroke_width = self.line_width - self.inset;
        let rotation = self.orientation.rotation();
        let line_cap = self.line_cap;

        self.background_shape.set_line_width(self.line_width);
        self.background_shape
            .set_stroke_color(self.background_shape_color);

        self.progress_shape.set_line_width(stroke_width);
        self.progress_shape.set_stroke_color(self.progress_shape_color);

        for (layer, segment) in self.extra_shapes.iter_mut().zip(&self.extra_progress) {
            layer.set_line_width(stroke_width);
            layer.set_stroke_color(segment.color());
        }

        for layer in self.shape_layers_mut() {
            layer.set_line_cap(line_cap);
            layer.set_rotation(rotation);
        }

        if self.orientation.shows_title() {
            self.title_label.set_hidden(false);
            let target = self.title_frame(self.orientation);
            if self.title_label.frame() != target {
                let now = self.clock.now();
                self.title_label
                    .animate_frame(target, TITLE_ANIMATION, TITLE_SPRING, now);
            }
        } else {
            self.title_label.set_hidden(true);
        }
    }

    /// Moves the progress to `progress`. Values above `1.0` are ignored.
    pub fn set_progress(&mut self, progress: f32, animated: bool) {
        if progress > 1.0 {
            debug!("Ignoring progress {} above 1.0", progress);
            return;
        }

        let now = self.clock.now();
        let start = self.progress_shape.presentation_stroke_end(now);

        self.percent_label
            .set_text(self.percent_label_format.render(f64::from(progress) * 100.0));

        self.progress_shape.set_stroke_end(progress);
        for (layer, segment) in self.extra_shapes.iter_mut().zip(&self.extra_progress) {
            layer.set_stroke_end(segment.drawn_end(progress));
        }

        if !animated {
            self.progress_shape.remove_animation();
            for layer in &mut self.extra_shapes {
                layer.remove_animation();
            }
            return;
        }

        let timeline = build_timeline(
            start,
            progress,
            &self.extra_progress,
            self.complete_duration,
        );
        debug!(
            "Animating progress from {} to {} over {}s",
            start, progress, timeline.duration
        );

        self.progress_shape
            .add_animation(StrokeAnimation::Basic(timeline.primary), now);
        for (layer, group) in self.extra_shapes.iter_mut().zip(timeline.segments) {
            layer.add_animation(StrokeAnimation::Group(group), now);
        }
    }

    /// The progress the view is heading to.
    pub fn progress(&self) -> f32 {
        self.progress_shape.stroke_end()
    }

    /// The progress as it is currently drawn.
    pub fn presentation_progress(&self) -> f32 {
        self.progress_shape
            .presentation_stroke_end(self.clock.now())
    }

    pub fn is_animating(&self) -> bool {
        let now = self.clock.now();
        self.progress_shape.is_animating(now)
            || self.extra_shapes.iter().any(|layer| layer.is_animating(now))
    }

    pub fn percent_text(&self) -> &str {
        self.percent_label.text()
    }

    pub fn percent_label(&self) -> &Label {
        &self.percent_label
    }

    pub fn title_label(&self) -> &Label {
        &self.title_label
    }

    pub fn background_shape(&self) -> &ShapeLayer {
        &self.background_shape
    }

    pub fn progress_shape(&self) -> &ShapeLayer {
        &self.progress_shape
    }

    pub fn extra_shapes(&self) -> &[ShapeLayer] {
        &self.extra_shapes
    }

    pub fn extra_layer_count(&self) -> usize {
        self.extra_shapes.len()
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rectangle) {
        self.frame = frame;
        self.layout();
    }

    pub fn clockwise(&self) -> bool {
        self.clockwise
    }

    pub fn set_clockwise(&mut self, clockwise: bool) {
        self.clockwise = clockwise;
        self.layout();
    }

    pub fn background_shape_color(&self) -> Rgb888 {
        self.background_shape_color
    }

    pub fn set_background_shape_color(&mut self, color: Rgb888) {
        self.background_shape_color = color;
        self.update_shapes();
    }

    pub fn progress_shape_color(&self) -> Rgb888 {
        self.progress_shape_color
    }

    pub fn set_progress_shape_color(&mut self, color: Rgb888) {
        self.progress_shape_color = color;
        self.update_shapes();
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Changes the stroke width. The ring is inset by half the width, so
    /// this also recomputes the geometry.
    pub fn set_line_width(&mut self, line_width: f32) {
        self.line_width = line_width;
        self.layout();
    }

    pub fn space_degree(&self) -> f32 {
        self.space_degree
    }

    /// Sets the gap on either side of the bottom point, in degrees. Values
    /// outside `[0, 180)` are passed through as they are.
    pub fn set_space_degree(&mut self, space_degree: f32) {
        self.space_degree = space_degree;
        self.layout();
    }

    pub fn inset(&self) -> f32 {
        self.inset
    }

    /// How much thinner the progress strokes are than the background track.
    pub fn set_inset(&mut self, inset: f32) {
        self.inset = inset;
        self.update_shapes();
    }

    pub fn percent_label_format(&self) -> &PercentFormat {
        &self.percent_label_format
    }

    /// Parses `format` and re-renders the percentage with it. An invalid
    /// format keeps the previous one.
    pub fn set_percent_label_format(&mut self, format: &str) -> Result<()> {
        self.percent_label_format = format.parse()?;
        self.refresh_percent_text();
        Ok(())
    }

    fn refresh_percent_text(&mut self) {
        self.percent_label.set_text(
            self.percent_label_format
                .render(f64::from(self.progress()) * 100.0),
        );
    }

    pub fn percent_color(&self) -> Rgb888 {
        self.percent_color
    }

    pub fn set_percent_color(&mut self, color: Rgb888) {
        self.percent_color = color;
        self.percent_label.set_color(color);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.title_label.set_text(self.title.clone());
    }

    pub fn title_color(&self) -> Rgb888 {
        self.title_color
    }

    pub fn set_title_color(&mut self, color: Rgb888) {
        self.title_color = color;
        self.title_label.set_color(color);
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    /// Font of both labels.
    pub fn set_font(&mut self, font: &'static MonoFont<'static>) {
        self.font = font;
        self.percent_label.set_font(font);
        self.title_label.set_font(font);
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        self.update_shapes();
    }

    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    pub fn set_line_cap(&mut self, line_cap: LineCap) {
        self.line_cap = line_cap;
        self.update_shapes();
    }

    pub fn complete_duration(&self) -> f32 {
        self.complete_duration
    }

    /// Seconds an animation across the whole ring takes. Running animations
    /// keep their timing.
    pub fn set_complete_duration(&mut self, complete_duration: f32) {
        self.complete_duration = complete_duration;
    }

    pub fn extra_progress(&self) -> &[ExtraSegment] {
        &self.extra_progress
    }

    /// Replaces all extra segments. The layers of the previous segments are
    /// dropped and one new layer is created per segment.
    pub fn set_extra_progress(&mut self, segments: Vec<ExtraSegment>) {
        debug!(
            "Replacing {} extra segments with {}",
            self.extra_progress.len(),
            segments.len()
        );

        let progress = self.progress();
        self.extra_shapes = segments
            .iter()
            .map(|segment| {
                let mut layer = ShapeLayer::new(segment.color());
                layer.set_stroke_start(segment.start());
                layer.set_stroke_end(segment.drawn_end(progress));
                layer
            })
            .collect();
        self.extra_progress = segments;

        self.layout();
    }
}

impl Drawable for ArcProgressView {
    type Color = Rgb888;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let now = self.clock.now();
        let mut target = target.translated(self.frame.top_left);

        self.background_shape.draw_at(now, &mut target)?;
        self.progress_shape.draw_at(now, &mut target)?;
        for layer in &self.extra_shapes {
            layer.draw_at(now, &mut target)?;
        }
        self.percent_label.draw_at(now, &mut target)?;
        self.title_label.draw_at(now, &mut target)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use arc_hardware::FrameBuffer;
    use embedded_graphics::{geometry::Point, pixelcolor::RgbColor};
    use rstest::rstest;

    const EPSILON: f32 = 1e-4;

    fn view() -> (ArcProgressView, ManualClock) {
        let clock = ManualClock::new();
        let view = ArcProgressView::new(Rectangle::new(Point::zero(), defaults::SIZE))
            .with_clock(clock.clone());
        (view, clock)
    }

    #[test]
    fn starts_with_the_initial_progress() {
        let (view, _) = view();

        assert_eq!(view.progress(), 0.1);
        assert_eq!(view.percent_text(), "10.0%");
        assert_eq!(view.extra_layer_count(), 0);
        assert_eq!(view.progress_shape().line_width(), 8.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.35)]
    #[case(1.0)]
    fn progress_is_set_exactly(#[case] progress: f32) {
        let (mut view, _) = view();
        view.set_progress(progress, false);

        assert_eq!(view.progress(), progress);
        assert_eq!(view.presentation_progress(), progress);
    }

    #[test]
    fn progress_above_one_is_ignored() {
        let (mut view, _) = view();
        view.set_progress(0.4, false);
        view.set_progress(1.2, true);

        assert_eq!(view.progress(), 0.4);
        assert_eq!(view.percent_text(), "40 %");
        assert!(!view.is_animating());
    }

    #[test]
    fn animation_runs_from_the_old_value() {
        let (mut view, clock) = view();
        view.set_progress(0.0, false);
        view.set_progress(1.0, true);

        assert_eq!(view.progress(), 1.0);
        assert_eq!(view.percent_text(), "100 %");
        assert!(view.presentation_progress().abs() < EPSILON);

        clock.advance_secs(0.35);
        assert!((view.presentation_progress() - 0.5).abs() < 1e-3);

        clock.advance_secs(0.4);
        assert!(!view.is_animating());
        assert_eq!(view.presentation_progress(), 1.0);
    }

    #[test]
    fn restarting_mid_flight_starts_from_the_shown_value() {
        let (mut view, clock) = view();
        view.set_progress(0.0, false);
        view.set_progress(1.0, true);
        clock.advance_secs(0.35);

        let shown = view.presentation_progress();
        view.set_progress(0.0, true);

        assert!((view.presentation_progress() - shown).abs() < EPSILON);
        let duration = view.progress_shape().animation().unwrap().duration();
        assert!((duration - shown * 0.7).abs() < 1e-3);
    }

    #[test]
    fn jumping_drops_running_animations() {
        let (mut view, clock) = view();
        view.set_progress(1.0, true);
        clock.advance_secs(0.1);
        view.set_progress(0.3, false);

        assert!(!view.is_animating());
        assert_eq!(view.presentation_progress(), 0.3);
    }

    #[test]
    fn segments_are_capped_by_the_progress() {
        let (mut view, _) = view();
        view.set_extra_progress(vec![
            ExtraSegment::new(0.0, 0.3, Rgb888::RED),
            ExtraSegment::new(0.5, 0.9, Rgb888::GREEN),
        ]);
        view.set_progress(0.6, false);

        let shapes = view.extra_shapes();
        assert_eq!(shapes[0].stroke_start(), 0.0);
        assert_eq!(shapes[0].stroke_end(), 0.3);
        assert_eq!(shapes[1].stroke_start(), 0.5);
        assert_eq!(shapes[1].stroke_end(), 0.6);
        assert_eq!(shapes[1].stroke_color(), Rgb888::GREEN);
    }

    #[test]
    fn animated_segments_follow_the_progress() {
        let (mut view, clock) = view();
        view.set_extra_progress(vec![ExtraSegment::new(0.2, 0.6, Rgb888::RED)]);
        view.set_progress(0.0, false);
        view.set_progress(1.0, true);

        let segment = &view.extra_shapes()[0];
        assert!(matches!(segment.animation(), Some(StrokeAnimation::Group(_))));

        clock.advance_secs(0.28);
        let now = clock.now();
        let primary = view.progress_shape().presentation_stroke_end(now);
        let shown = view.extra_shapes()[0].presentation_stroke_end(now);
        assert!((shown - primary).abs() < 1e-3);

        clock.advance_secs(0.42);
        assert_eq!(view.extra_shapes()[0].presentation_stroke_end(clock.now()), 0.6);
    }

    #[test]
    fn replacing_segments_rebuilds_the_layers() {
        let (mut view, _) = view();
        view.set_extra_progress(vec![
            ExtraSegment::new(0.0, 0.2, Rgb888::RED),
            ExtraSegment::new(0.2, 0.4, Rgb888::GREEN),
            ExtraSegment::new(0.4, 0.6, Rgb888::BLUE),
        ]);
        assert_eq!(view.extra_layer_count(), 3);

        view.set_extra_progress(vec![ExtraSegment::new(0.1, 0.5, Rgb888::YELLOW)]);
        assert_eq!(view.extra_layer_count(), 1);
        assert_eq!(view.extra_shapes()[0].stroke_color(), Rgb888::YELLOW);
        assert_eq!(
            view.extra_shapes()[0].path(),
            view.background_shape().path()
        );
    }

    #[test]
    fn side_orientations_hide_the_title() {
        let (mut view, clock) = view();
        view.set_title("Upload");
        let bottom = view.title_label().frame();

        view.set_orientation(Orientation::Left);
        assert!(view.title_label().is_hidden());
        assert_eq!(view.progress_shape().rotation(), Orientation::Left.rotation());

        view.set_orientation(Orientation::Bottom);
        assert!(!view.title_label().is_hidden());
        assert_eq!(view.title_label().frame(), bottom);
        assert_eq!(bottom, RectF::new(-2.0, 46.0, 100.0, 42.0));
        assert_eq!(view.title_label().presentation_frame(clock.now()), bottom);
    }

    #[test]
    fn title_springs_to_the_top() {
        let (mut view, clock) = view();
        view.set_orientation(Orientation::Top);

        let top = RectF::new(-2.0, 0.0, 100.0, 42.0);
        assert_eq!(view.title_label().frame(), top);
        assert_eq!(view.title_label().presentation_frame(clock.now()).y, 46.0);

        clock.advance(TITLE_ANIMATION);
        assert_eq!(view.title_label().presentation_frame(clock.now()), top);
        assert_eq!(view.background_shape().rotation(), Orientation::Top.rotation());
    }

    #[test]
    fn inset_thins_the_progress_strokes() {
        let (mut view, _) = view();
        view.set_extra_progress(vec![ExtraSegment::new(0.0, 0.5, Rgb888::RED)]);
        view.set_inset(3.0);

        assert_eq!(view.background_shape().line_width(), 8.0);
        assert_eq!(view.progress_shape().line_width(), 5.0);
        assert_eq!(view.extra_shapes()[0].line_width(), 5.0);
    }

    #[test]
    fn geometry_follows_line_width_and_frame() {
        let (mut view, _) = view();
        view.set_line_width(10.0);
        assert_eq!(view.progress_shape().path().unwrap().radius, 43.0);

        view.set_frame(Rectangle::new(Point::new(5, 5), Size::new(40, 40)));
        let path = view.background_shape().path().unwrap();
        assert_eq!(path.radius, 15.0);
        assert_eq!((path.center_x, path.center_y), (20.0, 20.0));
    }

    #[test]
    fn invalid_format_keeps_the_previous_one() {
        let (mut view, _) = view();
        view.set_progress(0.25, false);

        assert!(view.set_percent_label_format("%d").is_ok());
        assert_eq!(view.percent_text(), "25");
        assert!(view.set_percent_label_format("%s").is_err());
        assert_eq!(view.percent_label_format().as_str(), "%d");
        assert_eq!(view.percent_text(), "25");
    }

    #[test]
    fn description_configures_everything() {
        let description = ViewDescription::from_toml(
            r##"
            title = "Sync"
            line_width = 6.0
            orientation = "left"
            progress = 0.5
            percent_label_format = "%.1f%%"

            [[extra_progress]]
            start = 0.0
            end = 0.8
            color = "#00FF00"
            "##,
        )
        .unwrap();
        let view = ArcProgressView::from_description(&description).unwrap();

        assert_eq!(view.title(), "Sync");
        assert_eq!(view.line_width(), 6.0);
        assert_eq!(view.progress(), 0.5);
        assert_eq!(view.percent_text(), "50.0%");
        assert!(view.title_label().is_hidden());
        assert_eq!(view.extra_shapes()[0].stroke_end(), 0.5);
        assert_eq!(view.extra_shapes()[0].line_width(), 6.0);
    }

    #[test]
    fn description_progress_above_one_keeps_the_format() {
        let description = ViewDescription {
            progress: 1.5,
            percent_label_format: "%d%%".to_string(),
            ..ViewDescription::default()
        };
        let view = ArcProgressView::from_description(&description).unwrap();

        assert_eq!(view.progress(), defaults::PROGRESS);
        assert_eq!(view.percent_text(), "10%");
    }

    #[test]
    fn geometry_setters_reach_every_layer() {
        let (mut view, _) = view();
        view.set_extra_progress(vec![ExtraSegment::new(0.2, 0.6, Rgb888::RED)]);

        view.set_space_degree(90.0);
        view.set_clockwise(false);

        let path = view.background_shape().path().copied().unwrap();
        assert_eq!(view.progress_shape().path(), Some(&path));
        assert_eq!(view.extra_shapes()[0].path(), Some(&path));
        assert!((path.span_degrees() - 180.0).abs() < EPSILON);
        assert!(path.sweep() < 0.0);
    }

    #[test]
    fn styling_setters_reach_every_layer() {
        let (mut view, _) = view();
        view.set_extra_progress(vec![ExtraSegment::new(0.2, 0.6, Rgb888::RED)]);

        view.set_line_cap(LineCap::Square);
        view.set_progress_shape_color(Rgb888::GREEN);
        view.set_background_shape_color(Rgb888::WHITE);

        assert_eq!(view.background_shape().line_cap(), LineCap::Square);
        assert_eq!(view.progress_shape().line_cap(), LineCap::Square);
        assert_eq!(view.extra_shapes()[0].line_cap(), LineCap::Square);
        assert_eq!(view.progress_shape().stroke_color(), Rgb888::GREEN);
        assert_eq!(view.background_shape().stroke_color(), Rgb888::WHITE);
        // Segments keep their own color.
        assert_eq!(view.extra_shapes()[0].stroke_color(), Rgb888::RED);
    }

    #[test]
    fn description_with_unknown_font_fails() {
        let description = ViewDescription {
            font: "comic-sans".to_string(),
            ..ViewDescription::default()
        };

        assert!(ArcProgressView::from_description(&description).is_err());
    }

    #[test]
    fn draws_the_ring_and_leaves_the_gap_dark() {
        let (mut view, _) = view();
        view.set_progress(1.0, false);

        let mut fb = FrameBuffer::new(defaults::SIZE);
        view.draw(&mut fb).unwrap();

        assert_eq!(fb.pixel(Point::new(48, 4)), Some(defaults::PROGRESS_SHAPE_COLOR));
        assert_eq!(fb.pixel(Point::new(48, 92)), Some(Rgb888::BLACK));
    }

    #[test]
    fn draws_at_the_frame_origin() {
        let (mut view, _) = view();
        view.set_frame(Rectangle::new(Point::new(20, 10), defaults::SIZE));

        let mut fb = FrameBuffer::new(Size::new(140, 120));
        view.draw(&mut fb).unwrap();

        assert_eq!(
            fb.pixel(Point::new(68, 14)),
            Some(defaults::BACKGROUND_SHAPE_COLOR)
        );
        assert_eq!(fb.pixel(Point::new(48, 4)), Some(Rgb888::BLACK));
    }
}
