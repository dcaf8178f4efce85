use anyhow::{anyhow, Result};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{de, Deserialize, Deserializer};
use std::{f32::consts::PI, fmt, str::FromStr};

/// How the ends of the progress strokes are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum LineCap {
    /// A half circle with the diameter of the stroke width.
    Round,
    /// The stroke ends exactly at the end of the path.
    Butt,
    /// A half square that extends past the end of the path.
    Square,
}

/// The side of the ring the gap points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Orientation {
    Left,
    Top,
    Right,
    Bottom,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Round
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Bottom
    }
}

impl Orientation {
    /// Rotation applied to every shape layer, in radians (clockwise on screen).
    pub fn rotation(self) -> f32 {
        match self {
            Orientation::Left => PI / 2.0,
            Orientation::Top => PI,
            Orientation::Right => PI * 1.5,
            Orientation::Bottom => PI * 2.0,
        }
    }

    /// The title label is only shown when the gap is at the top or bottom.
    pub fn shows_title(self) -> bool {
        matches!(self, Orientation::Top | Orientation::Bottom)
    }

    /// Next side in the order bottom, left, top, right.
    pub fn next(self) -> Self {
        match self {
            Orientation::Bottom => Orientation::Left,
            Orientation::Left => Orientation::Top,
            Orientation::Top => Orientation::Right,
            Orientation::Right => Orientation::Bottom,
        }
    }
}

impl FromStr for LineCap {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "round" => Ok(LineCap::Round),
            "butt" => Ok(LineCap::Butt),
            "square" => Ok(LineCap::Square),
            other => Err(anyhow!("Unknown line cap: {}", other)),
        }
    }
}

impl FromStr for Orientation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Orientation::Left),
            "top" => Ok(Orientation::Top),
            "right" => Ok(Orientation::Right),
            "bottom" => Ok(Orientation::Bottom),
            other => Err(anyhow!("Unknown orientation: {}", other)),
        }
    }
}

/// Accepts either the name of a variant or its integer code.
struct NameOrCode<T>(std::marker::PhantomData<T>);

impl<'de, T> de::Visitor<'de> for NameOrCode<T>
where
    T: FromStr<Err = anyhow::Error> + TryFromPrimitive<Primitive = u8>,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a variant name or its integer code")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        u8::try_from(v)
            .ok()
            .and_then(|code| T::try_from_primitive(code).ok())
            .ok_or_else(|| E::custom(format!("invalid code {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        u8::try_from(v)
            .ok()
            .and_then(|code| T::try_from_primitive(code).ok())
            .ok_or_else(|| E::custom(format!("invalid code {}", v)))
    }
}

impl<'de> Deserialize<'de> for LineCap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NameOrCode(std::marker::PhantomData))
    }
}

impl<'de> Deserialize<'de> for Orientation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NameOrCode(std::marker::PhantomData))
    }
}
