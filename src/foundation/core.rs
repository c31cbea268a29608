use crate::foundation::error::{PlayerError, PlayerResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Millisecond timestamp on a scene's timeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// Timestamp in fractional seconds.
    pub fn as_secs_f64(self) -> f64 {
        (self.0 as f64) / 1000.0
    }

    /// Whole-second bucket the timestamp falls into (`floor(ms / 1000)`).
    pub fn whole_secs(self) -> u64 {
        self.0 / 1000
    }
}

/// Whole-second bucket of a play-head time. Negative and NaN inputs land in bucket 0.
pub fn secs_bucket(t_secs: f64) -> u64 {
    if t_secs.is_finite() && t_secs > 0.0 {
        t_secs.floor() as u64
    } else {
        0
    }
}

/// Scene aspect ratio; selects the canonical canvas elements are authored in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    /// 1920×1080.
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    /// 1080×1920.
    #[serde(rename = "9:16")]
    Portrait,
    /// 1080×1080.
    #[serde(rename = "1:1")]
    Square,
    /// 1440×1080.
    #[serde(rename = "4:3")]
    Classic,
}

impl AspectRatio {
    /// Parse the `w:h` keyword used in scene documents.
    pub fn from_keyword(value: &str) -> PlayerResult<Self> {
        match value.trim() {
            "16:9" => Ok(Self::Landscape),
            "9:16" => Ok(Self::Portrait),
            "1:1" => Ok(Self::Square),
            "4:3" => Ok(Self::Classic),
            other => Err(PlayerError::validation(format!(
                "unknown aspect ratio '{other}'"
            ))),
        }
    }

    /// `w:h` keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Square => "1:1",
            Self::Classic => "4:3",
        }
    }

    /// Canonical canvas for this ratio.
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            Self::Landscape => (1920, 1080),
            Self::Portrait => (1080, 1920),
            Self::Square => (1080, 1080),
            Self::Classic => (1440, 1080),
        };
        Canvas { width, height }
    }
}

/// Canonical canvas dimensions in authoring units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in canonical units.
    pub width: u32,
    /// Height in canonical units.
    pub height: u32,
}

impl Canvas {
    /// Canvas size as floating point.
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Measured size of the rendering surface in device pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Measured width.
    pub width: f64,
    /// Measured height.
    pub height: f64,
}

impl SurfaceSize {
    /// Construct a surface size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `true` until the host has laid the surface out with a positive area.
    pub fn is_unmeasured(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
