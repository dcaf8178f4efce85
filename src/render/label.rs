use crate::{geometry::RectF, timeline::Curve};
use anyhow::{anyhow, Result};
use embedded_graphics::{
    draw_target::{DrawTarget, DrawTargetExt},
    mono_font::{ascii, MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};
use std::{
    fmt,
    time::{Duration, Instant},
};

/// Fonts that can be picked by name in a view description.
static FONTS: &[(&str, &MonoFont<'static>)] = &[
    ("4x6", &ascii::FONT_4X6),
    ("5x8", &ascii::FONT_5X8),
    ("6x10", &ascii::FONT_6X10),
    ("6x13", &ascii::FONT_6X13),
    ("6x13_bold", &ascii::FONT_6X13_BOLD),
    ("7x13", &ascii::FONT_7X13),
    ("8x13", &ascii::FONT_8X13),
    ("8x13_bold", &ascii::FONT_8X13_BOLD),
    ("9x15", &ascii::FONT_9X15),
    ("10x20", &ascii::FONT_10X20),
];

pub fn default_font() -> &'static MonoFont<'static> {
    &ascii::FONT_6X13
}

pub fn font_by_name(name: &str) -> Result<&'static MonoFont<'static>> {
    FONTS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, font)| *font)
        .ok_or_else(|| anyhow!("Unknown font: {}", name))
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct FrameAnimation {
    from: RectF,
    to: RectF,
    added: Instant,
    duration: Duration,
    curve: Curve,
}

impl FrameAnimation {
    fn frame_at(&self, now: Instant) -> Option<RectF> {
        let elapsed = now.saturating_duration_since(self.added);
        if elapsed >= self.duration {
            return None;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        Some(self.from.lerp(self.to, self.curve.apply(t)))
    }
}

/// A single line of text centered in its frame.
#[derive(Clone)]
pub struct Label {
    text: String,
    color: Rgb888,
    font: &'static MonoFont<'static>,
    frame: RectF,
    hidden: bool,
    animation: Option<FrameAnimation>,
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("text", &self.text)
            .field("color", &self.color)
            .field("font", &self.font.character_size)
            .field("frame", &self.frame)
            .field("hidden", &self.hidden)
            .finish()
    }
}

impl Label {
    pub fn new(color: Rgb888) -> Self {
        Self {
            text: String::new(),
            color,
            font: default_font(),
            frame: RectF::default(),
            hidden: false,
            animation: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn color(&self) -> Rgb888 {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb888) {
        self.color = color;
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    pub fn set_font(&mut self, font: &'static MonoFont<'static>) {
        self.font = font;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// The frame the label ends up in once any animation has finished.
    pub fn frame(&self) -> RectF {
        self.frame
    }

    /// Moves the label right away, dropping a running frame animation.
    pub fn set_frame(&mut self, frame: RectF) {
        self.frame = frame;
        self.animation = None;
    }

    /// Moves the label to `frame` along `curve`, starting from where it is
    /// currently shown.
    pub fn animate_frame(&mut self, frame: RectF, duration: Duration, curve: Curve, now: Instant) {
        let from = self.presentation_frame(now);
        self.frame = frame;
        self.animation = Some(FrameAnimation {
            from,
            to: frame,
            added: now,
            duration,
            curve,
        });
    }

    pub fn presentation_frame(&self, now: Instant) -> RectF {
        self.animation
            .as_ref()
            .and_then(|animation| animation.frame_at(now))
            .unwrap_or(self.frame)
    }

    pub fn draw_at<D: DrawTarget<Color = Rgb888>>(
        &self,
        now: Instant,
        target: &mut D,
    ) -> Result<(), D::Error> {
        if self.hidden || self.text.is_empty() {
            return Ok(());
        }

        let frame = self.presentation_frame(now);
        let character_style = MonoTextStyle::new(self.font, self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(&self.text, frame.center(), character_style, text_style)
            .draw(&mut target.clipped(&frame.to_rectangle()))?;

        Ok(())
    }
}
