use crate::foundation::error::{MultiviewError, MultiviewResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Output (base) resolution of the composition engine, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> MultiviewResult<Self> {
        if width == 0 || height == 0 {
            return Err(MultiviewError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Straight-alpha color packed as `0xAARRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    pub const fn new(argb: u32) -> Self {
        Self(argb)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Unpack into `[r, g, b, a]` bytes.
    pub const fn to_rgba8(self) -> [u8; 4] {
        [
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
            (self.0 >> 24) as u8,
        ]
    }
}

/// Integer window-space rectangle, as handed to the graphics backend's viewport stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Aspect-preserving fit of the canvas into a window, centered on both axes.
///
/// The same fit drives both rendering and hit-testing, so the two can never disagree about
/// where a tile lives on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Letterbox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Window pixels per canvas unit.
    pub scale: f64,
}

impl Letterbox {
    pub fn fit(base: Canvas, window_width: u32, window_height: u32) -> Self {
        if base.is_empty() || window_width == 0 || window_height == 0 {
            return Self::default();
        }

        let window_aspect = f64::from(window_width) / f64::from(window_height);
        let base_aspect = base.aspect();

        // Fitted extents use exact integer ratios; float aspect products land a hair under
        // whole pixels for common resolutions.
        let (scale, width, height) = if window_aspect > base_aspect {
            (
                f64::from(window_height) / f64::from(base.height),
                mul_div(window_height, base.width, base.height),
                window_height as i32,
            )
        } else {
            (
                f64::from(window_width) / f64::from(base.width),
                window_width as i32,
                mul_div(window_width, base.height, base.width),
            )
        };

        Self {
            x: (window_width / 2) as i32 - width / 2,
            y: (window_height / 2) as i32 - height / 2,
            width,
            height,
            scale,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The active sub-rectangle of the window, in window pixels.
    pub fn rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x + self.width),
            f64::from(self.y + self.height),
        )
    }

    /// Window viewport for a canvas-space region, truncated to whole pixels.
    pub fn viewport(&self, region: Rect) -> PixelRect {
        PixelRect {
            x: (f64::from(self.x) + region.x0 * self.scale) as i32,
            y: (f64::from(self.y) + region.y0 * self.scale) as i32,
            width: (region.width() * self.scale) as i32,
            height: (region.height() * self.scale) as i32,
        }
    }
}

fn mul_div(a: u32, b: u32, c: u32) -> i32 {
    let v = u64::from(a) * u64::from(b) / u64::from(c);
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
