use crate::foundation::error::{ScrollframeError, ScrollframeResult};

pub use kurbo::{Point, Rect, Vec2};

/// CSS width below which a viewport is treated as compact (phone-class).
pub const COMPACT_VIEWPORT_MAX_CSS_WIDTH: f64 = 768.0;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Zero-based index into a frame sequence.
pub struct FrameIndex(pub u32);

impl FrameIndex {
    /// Index as `usize` for slot lookups.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u32", into = "u32")]
/// Number of frames in a sequence. Always at least one.
pub struct FrameCount(u32);

impl FrameCount {
    /// Validate and wrap a frame count.
    pub fn new(n: u32) -> ScrollframeResult<Self> {
        if n == 0 {
            return Err(ScrollframeError::validation("frame count must be > 0"));
        }
        Ok(Self(n))
    }

    /// Raw count.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Last valid index (`count - 1`).
    pub fn last(self) -> FrameIndex {
        FrameIndex(self.0 - 1)
    }

    /// Iterate all indices in order.
    pub fn indices(self) -> impl Iterator<Item = FrameIndex> {
        (0..self.0).map(FrameIndex)
    }
}

impl TryFrom<u32> for FrameCount {
    type Error = ScrollframeError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<FrameCount> for u32 {
    fn from(c: FrameCount) -> Self {
        c.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Drawing-surface size in device pixels.
pub struct SurfaceSize {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Build a size; zero dimensions are bumped to 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Full-surface rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Pixel count.
    pub fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Coarse viewport class, used to pick the forced-completion budget.
pub enum ViewportClass {
    /// Phone-class viewport.
    Compact,
    /// Tablet/desktop-class viewport.
    Wide,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Browser-style viewport: CSS pixel size plus device pixel ratio.
pub struct Viewport {
    /// Width in CSS pixels.
    pub css_width: f64,
    /// Height in CSS pixels.
    pub css_height: f64,
    /// Device pixels per CSS pixel.
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Validate and build a viewport.
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> ScrollframeResult<Self> {
        for (name, v) in [
            ("css_width", css_width),
            ("css_height", css_height),
            ("device_pixel_ratio", device_pixel_ratio),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ScrollframeError::validation(format!(
                    "viewport {name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(Self {
            css_width,
            css_height,
            device_pixel_ratio,
        })
    }

    /// Backing-surface size in device pixels (never smaller than 1x1).
    pub fn surface_size(self) -> SurfaceSize {
        fn device_px(css: f64, dpr: f64) -> u32 {
            let v = (css * dpr).round();
            if v.is_finite() && v >= 1.0 {
                v.min(f64::from(u32::MAX)) as u32
            } else {
                1
            }
        }
        SurfaceSize::new(
            device_px(self.css_width, self.device_pixel_ratio),
            device_px(self.css_height, self.device_pixel_ratio),
        )
    }

    /// Compact when narrower than [`COMPACT_VIEWPORT_MAX_CSS_WIDTH`].
    pub fn class(self) -> ViewportClass {
        if self.css_width < COMPACT_VIEWPORT_MAX_CSS_WIDTH {
            ViewportClass::Compact
        } else {
            ViewportClass::Wide
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            css_width: 1280.0,
            css_height: 720.0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel (premultiplied).
    pub r: u8,
    /// Green channel (premultiplied).
    pub g: u8,
    /// Blue channel (premultiplied).
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply a straight-alpha color.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> ScrollframeResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let bad = || ScrollframeError::validation(format!("invalid hex color '{s}'"));
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| bad())
        };

        match hex.len() {
            3 => Ok(Self::from_straight_rgba(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
            6 => Ok(Self::from_straight_rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::from_straight_rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(bad()),
        }
    }

    /// Pixel bytes in surface order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba8Premul {
    fn default() -> Self {
        Self::from_straight_rgba(0x05, 0x05, 0x05, 0xff)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
