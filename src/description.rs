//! Serialized form of a progress view, as found in settings files.
use crate::{
    segment::ExtraSegment,
    style::{LineCap, Orientation},
    view::defaults,
};
use anyhow::{anyhow, Context, Result};
use embedded_graphics::{
    geometry::{Point, Size},
    pixelcolor::Rgb888,
    primitives::Rectangle,
};
use serde::{de, Deserialize, Deserializer};
use std::str::FromStr;

/// A color written as `"#RRGGBB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(pub Rgb888);

impl FromStr for HexColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return Err(anyhow!("Expected a color like #RRGGBB, got {:?}", s));
        }
        let value = u32::from_str_radix(hex, 16)
            .with_context(|| format!("Invalid color {:?}", s))?;
        Ok(HexColor(Rgb888::new(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        )))
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl From<HexColor> for Rgb888 {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl From<Rgb888> for HexColor {
    fn from(color: Rgb888) -> Self {
        HexColor(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FrameDescription {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for FrameDescription {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: defaults::SIZE.width,
            height: defaults::SIZE.height,
        }
    }
}

impl From<FrameDescription> for Rectangle {
    fn from(frame: FrameDescription) -> Self {
        Rectangle::new(
            Point::new(frame.x, frame.y),
            Size::new(frame.width, frame.height),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SegmentDescription {
    pub start: f32,
    pub end: f32,
    pub color: HexColor,
}

impl From<&SegmentDescription> for ExtraSegment {
    fn from(segment: &SegmentDescription) -> Self {
        ExtraSegment::new(segment.start, segment.end, segment.color.into())
    }
}

/// Everything needed to build an `ArcProgressView`. Missing keys fall back
/// to the defaults of a freshly created view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewDescription {
    pub frame: FrameDescription,
    pub clockwise: bool,
    pub background_shape_color: HexColor,
    pub progress_shape_color: HexColor,
    pub line_width: f32,
    pub space_degree: f32,
    pub inset: f32,
    pub percent_label_format: String,
    pub percent_color: HexColor,
    pub title: String,
    pub title_color: HexColor,
    /// Name of an `embedded-graphics` mono font, e.g. `"6x13"`.
    pub font: String,
    pub orientation: Orientation,
    pub line_cap: LineCap,
    pub extra_progress: Vec<SegmentDescription>,
    /// Seconds for an animation across the whole ring.
    pub complete_duration: f32,
    pub progress: f32,
}

impl Default for ViewDescription {
    fn default() -> Self {
        Self {
            frame: FrameDescription::default(),
            clockwise: true,
            background_shape_color: defaults::BACKGROUND_SHAPE_COLOR.into(),
            progress_shape_color: defaults::PROGRESS_SHAPE_COLOR.into(),
            line_width: defaults::LINE_WIDTH,
            space_degree: defaults::SPACE_DEGREE,
            inset: 0.0,
            percent_label_format: defaults::PERCENT_LABEL_FORMAT.to_string(),
            percent_color: defaults::LABEL_COLOR.into(),
            title: String::new(),
            title_color: defaults::LABEL_COLOR.into(),
            font: defaults::FONT.to_string(),
            orientation: Orientation::default(),
            line_cap: LineCap::default(),
            extra_progress: Vec::new(),
            complete_duration: defaults::COMPLETE_DURATION,
            progress: defaults::PROGRESS,
        }
    }
}

impl ViewDescription {
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse progress view description")
    }

    pub fn extra_segments(&self) -> Vec<ExtraSegment> {
        self.extra_progress.iter().map(ExtraSegment::from).collect()
    }
}
